//! Writers for the four normalization outputs.
//!
//! Delimited files use `;` with every field quoted, the format the
//! downstream spreadsheet import expects.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use poolquote_catalog::CatalogItem;

use crate::config::NormalizeConfig;
use crate::error::NormalizeError;
use crate::pipeline::NormalizationOutput;

pub const CATALOG_HEADER: [&str; 15] = [
    "product_code",
    "old_code",
    "product_name",
    "category",
    "subcategory",
    "product_type",
    "brand",
    "description",
    "unit",
    "base_price",
    "currency",
    "active",
    "source_notes",
    "needs_review",
    "review_reason",
];

pub const MAPPING_HEADER: [&str; 3] = ["old_code", "new_code", "product_name"];

pub const CATALOG_CSV: &str = "catalog.csv";
pub const MAPPING_CSV: &str = "code_mapping.csv";
pub const CATALOG_JSON: &str = "catalog.json";
pub const SUMMARY_TXT: &str = "summary.txt";

fn delimited<W: Write, T: Serialize>(writer: W, header: &[&str], rows: &[T]) -> Result<(), NormalizeError> {
    let mut csv = csv::WriterBuilder::new()
        .delimiter(b';')
        .quote_style(csv::QuoteStyle::Always)
        .has_headers(false)
        .from_writer(writer);

    csv.write_record(header)?;
    for row in rows {
        csv.serialize(row)?;
    }
    csv.flush()?;
    Ok(())
}

pub fn write_catalog_csv<W: Write>(writer: W, output: &NormalizationOutput) -> Result<(), NormalizeError> {
    delimited(writer, &CATALOG_HEADER, &output.records)
}

pub fn write_mapping_csv<W: Write>(writer: W, output: &NormalizationOutput) -> Result<(), NormalizeError> {
    delimited(writer, &MAPPING_HEADER, &output.mapping)
}

pub fn write_catalog_json<W: Write>(writer: W, items: &[CatalogItem]) -> Result<(), NormalizeError> {
    serde_json::to_writer_pretty(writer, items)?;
    Ok(())
}

/// Human-readable run report.
pub fn write_summary<W: Write>(
    mut w: W,
    output: &NormalizationOutput,
    config: &NormalizeConfig,
    generated_at: DateTime<Utc>,
) -> Result<(), NormalizeError> {
    let flagged: Vec<_> = output.flagged().collect();
    let input = output.records.len() + output.dropped + output.rejected.len();

    writeln!(w, "Catalog normalization summary")?;
    writeln!(w, "Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
    writeln!(w, "Currency: {}", config.currency)?;
    writeln!(w)?;
    writeln!(w, "Input records:      {input}")?;
    writeln!(w, "Normalized:         {}", output.records.len())?;
    writeln!(w, "Dropped (non-item): {}", output.dropped)?;
    writeln!(w, "Rejected:           {}", output.rejected.len())?;
    writeln!(w, "Needs review:       {}", flagged.len())?;

    writeln!(w)?;
    writeln!(w, "By category:")?;
    for (category, count) in output.counts_by_category() {
        writeln!(w, "  {category}: {count}")?;
    }

    if !flagged.is_empty() {
        writeln!(w)?;
        writeln!(w, "Flagged for review:")?;
        for record in &flagged {
            writeln!(
                w,
                "  {} | {} | {}",
                record.product_code, record.product_name, record.review_reason
            )?;
        }
    }

    if !output.rejected.is_empty() {
        writeln!(w)?;
        writeln!(w, "Rejected input elements:")?;
        for rejected in &output.rejected {
            writeln!(w, "  #{}: {}", rejected.index, rejected.error)?;
        }
    }

    let shown = output.mapping.len().min(config.mapping_excerpt);
    writeln!(w)?;
    writeln!(w, "Code mapping (first {shown} of {}):", output.mapping.len())?;
    for row in output.mapping.iter().take(shown) {
        let old = if row.old_code.is_empty() { "-" } else { row.old_code.as_str() };
        writeln!(w, "  {old} -> {} | {}", row.new_code, row.product_name)?;
    }

    w.flush()?;
    Ok(())
}

fn create(dir: &Path, name: &str) -> Result<(PathBuf, BufWriter<File>), NormalizeError> {
    let path = dir.join(name);
    let file = File::create(&path).map_err(|source| NormalizeError::Write {
        path: path.clone(),
        source,
    })?;
    Ok((path, BufWriter::new(file)))
}

/// Write all outputs into `config.output_dir`, creating it if needed.
///
/// The catalog is validated before anything is written.
pub fn write_all(output: &NormalizationOutput, config: &NormalizeConfig) -> Result<Vec<PathBuf>, NormalizeError> {
    let items = output.catalog()?.into_items();
    let dir = config.output_dir.as_path();
    fs::create_dir_all(dir).map_err(|source| NormalizeError::Write {
        path: dir.to_path_buf(),
        source,
    })?;

    let (catalog_csv, w) = create(dir, CATALOG_CSV)?;
    write_catalog_csv(w, output)?;

    let (mapping_csv, w) = create(dir, MAPPING_CSV)?;
    write_mapping_csv(w, output)?;

    let (catalog_json, w) = create(dir, CATALOG_JSON)?;
    write_catalog_json(w, &items)?;

    let (summary, w) = create(dir, SUMMARY_TXT)?;
    write_summary(w, output, config, Utc::now())?;

    Ok(vec![catalog_csv, mapping_csv, catalog_json, summary])
}

use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use poolquote_catalog::{Catalog, CatalogItem, Pricing, ProductType, Unit};
use poolquote_codegen::text::fold;
use poolquote_codegen::{CodeGenerator, RawCatalogRecord};
use poolquote_core::CatalogItemId;

use crate::config::NormalizeConfig;
use crate::error::NormalizeError;
use crate::review::{self, is_boilerplate, join_reasons};

/// Bucket for rows whose category no rule recognizes.
pub const FALLBACK_CATEGORY: &str = "materialy";
pub const FALLBACK_SUBCATEGORY: &str = "ostatni";

/// One row of the normalized catalog, in export column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub product_code: String,
    pub old_code: Option<String>,
    pub product_name: String,
    pub category: String,
    pub subcategory: String,
    pub product_type: ProductType,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub unit: Unit,
    pub base_price: Decimal,
    pub currency: String,
    pub active: bool,
    pub source_notes: Option<String>,
    pub needs_review: bool,
    pub review_reason: String,
}

impl NormalizedRecord {
    pub fn to_catalog_item(&self) -> CatalogItem {
        let mut item = CatalogItem::new(
            CatalogItemId::from_code(&self.product_code),
            self.product_code.clone(),
            self.product_name.clone(),
            self.category.clone(),
            self.subcategory.clone(),
            Pricing::fixed(self.base_price),
        )
        .with_unit(self.unit)
        .with_product_type(self.product_type);
        item.old_code = self.old_code.clone();
        item.brand = self.brand.clone();
        item.active = self.active;
        item
    }
}

/// Old code to new code, one per normalized row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeMappingRow {
    pub old_code: String,
    pub new_code: String,
    pub product_name: String,
}

/// Input element that could not be read as a record at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    /// Position in the input array.
    pub index: usize,
    pub error: String,
}

/// Parse the raw export. Only a non-array document is fatal; elements that do
/// not deserialize are returned as rejected.
pub fn parse_records(json: &str) -> Result<(Vec<RawCatalogRecord>, Vec<RejectedRecord>), NormalizeError> {
    let values: Vec<serde_json::Value> =
        serde_json::from_str(json).map_err(NormalizeError::InvalidInput)?;

    let mut records = Vec::with_capacity(values.len());
    let mut rejected = Vec::new();
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<RawCatalogRecord>(value) {
            Ok(record) => records.push(record),
            Err(err) => {
                tracing::warn!(index, error = %err, "skipping unreadable record");
                rejected.push(RejectedRecord {
                    index,
                    error: err.to_string(),
                });
            }
        }
    }
    Ok((records, rejected))
}

/// Everything one run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizationOutput {
    pub records: Vec<NormalizedRecord>,
    pub mapping: Vec<CodeMappingRow>,
    /// Boilerplate lines dropped before code generation.
    pub dropped: usize,
    pub rejected: Vec<RejectedRecord>,
}

impl NormalizationOutput {
    pub fn flagged(&self) -> impl Iterator<Item = &NormalizedRecord> {
        self.records.iter().filter(|r| r.needs_review)
    }

    pub fn counts_by_category(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.category.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Rows as catalog items, validated as one catalog.
    pub fn catalog(&self) -> Result<Catalog, NormalizeError> {
        let items = self.records.iter().map(NormalizedRecord::to_catalog_item).collect();
        Ok(Catalog::new(items)?)
    }
}

/// Runs the normalization over one batch.
#[derive(Debug, Clone)]
pub struct Normalizer {
    currency: String,
}

impl Normalizer {
    pub fn new(config: &NormalizeConfig) -> Self {
        Self {
            currency: config.currency.clone(),
        }
    }

    /// Normalize `records` in input order with a fresh code registry.
    pub fn run(&self, records: &[RawCatalogRecord]) -> NormalizationOutput {
        let mut generator = CodeGenerator::new();
        let mut output = NormalizationOutput::default();

        for record in records {
            if is_boilerplate(&record.name) {
                tracing::debug!(name = %record.name, "dropping boilerplate line");
                output.dropped += 1;
                continue;
            }

            let normalized = self.normalize(&mut generator, record);
            output.mapping.push(CodeMappingRow {
                old_code: normalized.old_code.clone().unwrap_or_default(),
                new_code: normalized.product_code.clone(),
                product_name: normalized.product_name.clone(),
            });
            output.records.push(normalized);
        }

        tracing::info!(
            input = records.len(),
            normalized = output.records.len(),
            dropped = output.dropped,
            flagged = output.flagged().count(),
            "normalization finished"
        );
        output
    }

    fn normalize(&self, generator: &mut CodeGenerator, record: &RawCatalogRecord) -> NormalizedRecord {
        let assignment = generator.assign(record);
        let recognized = !assignment.needs_review();
        let reasons = review::review(record, recognized);

        let (category, subcategory) = if recognized {
            (fold(record.category()), fold(record.subcategory()))
        } else {
            (FALLBACK_CATEGORY.to_string(), FALLBACK_SUBCATEGORY.to_string())
        };

        let product_type = record
            .product_type
            .as_deref()
            .and_then(|raw| ProductType::from_str(raw).ok())
            .unwrap_or_else(|| default_product_type(&category));

        let unit = match record.unit.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
            Some(raw) => Unit::from_str(raw).unwrap_or_else(|_| {
                tracing::debug!(unit = raw, code = %assignment.code, "unknown unit, using ks");
                Unit::Piece
            }),
            None => Unit::Piece,
        };

        let base_price = record.price.filter(|p| *p >= Decimal::ZERO).unwrap_or(Decimal::ZERO);

        if !reasons.is_empty() {
            tracing::debug!(code = %assignment.code, reasons = reasons.len(), "record flagged for review");
        }

        NormalizedRecord {
            product_code: assignment.code,
            old_code: non_blank(record.code.as_deref()),
            product_name: record.name.trim().to_string(),
            category,
            subcategory,
            product_type,
            brand: non_blank(record.brand.as_deref()),
            description: non_blank(record.description.as_deref()),
            unit,
            base_price,
            currency: self.currency.clone(),
            active: true,
            source_notes: non_blank(record.source.as_deref()),
            needs_review: !reasons.is_empty(),
            review_reason: join_reasons(&reasons),
        }
    }
}

fn default_product_type(category: &str) -> ProductType {
    match category {
        "bazeny" | "sety" => ProductType::Core,
        "materialy" => ProductType::Material,
        "sluzby" => ProductType::Service,
        _ => ProductType::Addon,
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

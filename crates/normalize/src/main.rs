use std::fs;

use anyhow::Context;

use poolquote_normalize::{NormalizeConfig, Normalizer, export, parse_records};

fn main() -> anyhow::Result<()> {
    poolquote_observability::init();

    let config = NormalizeConfig::from_env().with_input_arg(std::env::args().nth(1));
    let input = config.input_path()?;

    let raw = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let (records, rejected) = parse_records(&raw)
        .with_context(|| format!("failed to parse {}", input.display()))?;

    let mut output = Normalizer::new(&config).run(&records);
    output.rejected = rejected;

    let written = export::write_all(&output, &config).context("failed to write outputs")?;
    for path in &written {
        tracing::info!(path = %path.display(), "wrote");
    }

    Ok(())
}

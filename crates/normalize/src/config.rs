use std::path::{Path, PathBuf};

use crate::error::NormalizeError;

const INPUT_VAR: &str = "POOLQUOTE_INPUT";
const OUTPUT_DIR_VAR: &str = "POOLQUOTE_OUTPUT_DIR";
const CURRENCY_VAR: &str = "POOLQUOTE_CURRENCY";
const MAPPING_EXCERPT_VAR: &str = "POOLQUOTE_MAPPING_EXCERPT";

/// Settings of one normalization run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeConfig {
    pub input: Option<PathBuf>,
    pub output_dir: PathBuf,
    /// Currency written to every catalog row.
    pub currency: String,
    /// Mapping rows shown in the summary report.
    pub mapping_excerpt: usize,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            input: None,
            output_dir: PathBuf::from("./out"),
            currency: "CZK".to_string(),
            mapping_excerpt: 20,
        }
    }
}

impl NormalizeConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparsable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let value = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let input = value(INPUT_VAR).map(PathBuf::from);
        if input.is_none() {
            tracing::warn!("{INPUT_VAR} not set; expecting the input path as an argument");
        }

        let mapping_excerpt = match value(MAPPING_EXCERPT_VAR) {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "{MAPPING_EXCERPT_VAR} is not a number; using default");
                defaults.mapping_excerpt
            }),
            None => defaults.mapping_excerpt,
        };

        Self {
            input,
            output_dir: value(OUTPUT_DIR_VAR).map(PathBuf::from).unwrap_or(defaults.output_dir),
            currency: value(CURRENCY_VAR)
                .map(|c| c.to_uppercase())
                .unwrap_or(defaults.currency),
            mapping_excerpt,
        }
    }

    /// A path given on the command line wins over the environment.
    pub fn with_input_arg(mut self, arg: Option<String>) -> Self {
        if let Some(path) = arg.filter(|a| !a.trim().is_empty()) {
            self.input = Some(PathBuf::from(path));
        }
        self
    }

    pub fn input_path(&self) -> Result<&Path, NormalizeError> {
        self.input.as_deref().ok_or(NormalizeError::MissingInput)
    }
}

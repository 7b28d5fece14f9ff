use std::path::PathBuf;

use thiserror::Error;

use poolquote_catalog::CatalogError;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("no input file: set POOLQUOTE_INPUT or pass a path argument")]
    MissingInput,

    #[error("input is not a JSON array of records: {0}")]
    InvalidInput(#[source] serde_json::Error),

    #[error("normalized rows do not form a valid catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("csv output failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("json output failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

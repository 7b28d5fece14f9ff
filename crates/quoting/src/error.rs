use thiserror::Error;

use poolquote_catalog::PricingError;
use poolquote_core::{CatalogItemId, DomainError};

/// Failure of one quote resolution request.
///
/// Any of these aborts the whole request; the caller's existing items are
/// never touched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] DomainError),

    #[error("cannot price {code}: {source}")]
    Pricing {
        code: String,
        #[source]
        source: PricingError,
    },

    #[error("required surcharge cycle: {}", path.join(" -> "))]
    SurchargeCycle { path: Vec<String> },

    #[error("item {code} requires unknown surcharge {surcharge}")]
    UnknownSurcharge {
        code: String,
        surcharge: CatalogItemId,
    },

    #[error("item {code} requires inactive surcharge {surcharge}")]
    InactiveSurcharge { code: String, surcharge: String },
}

impl From<PricingError> for ResolveError {
    fn from(source: PricingError) -> Self {
        Self::Pricing {
            code: source.item_code().to_string(),
            source,
        }
    }
}

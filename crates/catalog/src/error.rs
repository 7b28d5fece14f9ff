use poolquote_core::CatalogItemId;
use thiserror::Error;

/// Catalog load-time validation failure.
///
/// A catalog that fails validation is rejected as a whole; callers fix the
/// offending rows instead of discovering broken references during a quote.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate catalog item id {0}")]
    DuplicateId(CatalogItemId),

    #[error("duplicate product code {0}")]
    DuplicateCode(String),

    #[error("item {code}: {reason}")]
    InvalidItem { code: String, reason: String },

    #[error("item {code} references missing product {reference}")]
    DanglingReference {
        code: String,
        reference: CatalogItemId,
    },

    #[error("item {code} references {reference_code}, which is not fixed-priced")]
    ReferenceNotFixed {
        code: String,
        reference_code: String,
    },

    #[error("item {code} references itself as its price reference")]
    SelfReference { code: String },

    #[error("item {code} requires missing surcharge {surcharge}")]
    DanglingSurcharge {
        code: String,
        surcharge: CatalogItemId,
    },
}

impl CatalogError {
    pub fn invalid(code: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidItem {
            code: code.into(),
            reason: reason.into(),
        }
    }
}

/// Price resolution failure for a single catalog item.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PricingError {
    #[error("item {code}: price reference {reference} cannot be resolved")]
    UnresolvableReference {
        code: String,
        reference: CatalogItemId,
    },

    #[error("item {code}: price reference {reference_code} is not fixed-priced")]
    ReferenceNotFixed {
        code: String,
        reference_code: String,
    },

    #[error("item {code}: coefficient price requires a pool measurement")]
    MissingMeasurement { code: String },

    #[error("item {code}: price is out of range")]
    Overflow { code: String },
}

impl PricingError {
    /// Code of the catalog item whose price could not be resolved.
    pub fn item_code(&self) -> &str {
        match self {
            PricingError::UnresolvableReference { code, .. }
            | PricingError::ReferenceNotFixed { code, .. }
            | PricingError::MissingMeasurement { code }
            | PricingError::Overflow { code } => code,
        }
    }
}

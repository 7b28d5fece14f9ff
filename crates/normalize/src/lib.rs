//! Offline catalog normalization.
//!
//! Reads the raw supplier export (a JSON array of loosely filled rows), drops
//! boilerplate lines, assigns structured product codes and flags anything a
//! human should look at. Produces the normalized catalog (CSV and JSON), the
//! old-to-new code mapping and a short summary report.
//!
//! A malformed row never aborts the run: it is either flagged for review or
//! reported as rejected.

pub mod config;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod review;

pub use config::NormalizeConfig;
pub use error::NormalizeError;
pub use pipeline::{
    CodeMappingRow, NormalizationOutput, NormalizedRecord, Normalizer, RejectedRecord, parse_records,
};
pub use review::{ReviewReason, is_boilerplate};

//! Deterministic product-code generation.
//!
//! Raw supplier rows carry free-text names and loosely spelled categories.
//! This crate turns each row into a structured, collision-free product code:
//!
//! - [`dimensions`] pulls measurements out of free text,
//! - [`rules`] maps a category to a code prefix and builds the suffix,
//! - [`registry`] disambiguates repeated base codes within one run,
//! - [`generator`] composes the three over a batch.

#[macro_use]
mod macros;

pub mod dimensions;
pub mod generator;
pub mod record;
pub mod registry;
pub mod rules;
pub mod text;

pub use dimensions::{DimensionKind, extract, extract_lengths, extract_single};
pub use generator::{CodeAssignment, CodeGenerator};
pub use record::RawCatalogRecord;
pub use registry::CodeRegistry;
pub use rules::{CategoryRule, CodeParts};

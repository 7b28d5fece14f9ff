//! Product catalog domain module.
//!
//! This crate contains the normalized catalog item model, load-time catalog
//! validation and price resolution, implemented purely as deterministic domain
//! logic (no IO, no HTTP, no storage).

pub mod catalog;
pub mod error;
pub mod item;
pub mod pricing;

pub use catalog::{Catalog, CatalogLookup};
pub use error::{CatalogError, PricingError};
pub use item::{CatalogItem, CoefficientUnit, PriceType, Pricing, ProductType, Unit};
pub use pricing::{resolve_price, round_to_currency};

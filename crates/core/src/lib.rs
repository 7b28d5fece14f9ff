//! `poolquote-core`: domain primitives shared by every other crate.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, the domain error model, and pool geometry together with the
//! pool-code grammar shared by the code generator and the quote matcher.

pub mod entity;
pub mod error;
pub mod id;
pub mod pool;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{CatalogItemId, ConfigurationId};
pub use pool::{
    MAX_DIMENSION, Measurement, POOL_CODE_PREFIX, PoolCode, PoolDimensions, PoolGeometry, PoolShape, PoolType,
};
pub use value_object::ValueObject;

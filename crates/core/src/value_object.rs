//! Attribute-defined domain values.

/// Marker for values compared by their attributes alone.
///
/// Pool dimensions and measurements are value objects: a 3 × 6 × 1.2 skimmer
/// pool parsed from a catalog code equals the same pool typed into the
/// configurator. They are never mutated in place; derive a new value instead.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

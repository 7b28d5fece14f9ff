//! Pool geometry and the pool-code grammar.
//!
//! A pool code has the shape `BAZ-{SHAPE}-{TYPE}-{dims...}`:
//!
//! - `SHAPE`: `KRU` (circle) or `OBD` (rectangle)
//! - `TYPE`: `SK` (skimmer) or `PR` (overflow)
//! - circle dims: `diameter-depth`; rectangle dims: `width-length-depth`
//!
//! [`PoolCode`] is the only writer and the only reader of this grammar. The
//! product code generator formats pool codes through it and the quote matcher
//! parses them back through it, so the two cannot drift apart.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// Leading segment of every pool code.
pub const POOL_CODE_PREFIX: &str = "BAZ";

const SEPARATOR: char = '-';

/// Placeholder dimension segment for pools whose name carries no dimensions.
const UNSIZED_MARKER: &str = "STD";

/// Largest accepted pool dimension, in metres.
pub const MAX_DIMENSION: Decimal = Decimal::ONE_THOUSAND;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolShape {
    Circle,
    Rectangle,
}

impl PoolShape {
    pub fn code_token(self) -> &'static str {
        match self {
            PoolShape::Circle => "KRU",
            PoolShape::Rectangle => "OBD",
        }
    }

    pub fn from_code_token(token: &str) -> Option<Self> {
        match token {
            "KRU" => Some(PoolShape::Circle),
            "OBD" => Some(PoolShape::Rectangle),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolType {
    Skimmer,
    Overflow,
}

impl PoolType {
    pub fn code_token(self) -> &'static str {
        match self {
            PoolType::Skimmer => "SK",
            PoolType::Overflow => "PR",
        }
    }

    pub fn from_code_token(token: &str) -> Option<Self> {
        match token {
            "SK" => Some(PoolType::Skimmer),
            "PR" => Some(PoolType::Overflow),
            _ => None,
        }
    }
}

/// Shape-specific dimensions, in metres.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum PoolGeometry {
    Circle {
        diameter: Decimal,
        depth: Decimal,
    },
    Rectangle {
        width: Decimal,
        length: Decimal,
        depth: Decimal,
    },
}

impl PoolGeometry {
    pub fn shape(&self) -> PoolShape {
        match self {
            PoolGeometry::Circle { .. } => PoolShape::Circle,
            PoolGeometry::Rectangle { .. } => PoolShape::Rectangle,
        }
    }

    pub fn depth(&self) -> Decimal {
        match self {
            PoolGeometry::Circle { depth, .. } | PoolGeometry::Rectangle { depth, .. } => *depth,
        }
    }

    fn values(&self) -> Vec<Decimal> {
        match self {
            PoolGeometry::Circle { diameter, depth } => vec![*diameter, *depth],
            PoolGeometry::Rectangle {
                width,
                length,
                depth,
            } => vec![*width, *length, *depth],
        }
    }
}

/// Structured pool description: shape, type and dimensions.
///
/// Derived, never stored on its own; always reconstructable from a valid pool code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolDimensions {
    #[serde(rename = "type")]
    pub pool_type: PoolType,
    #[serde(flatten)]
    pub geometry: PoolGeometry,
}

impl ValueObject for PoolDimensions {}

impl PoolDimensions {
    pub fn circle(pool_type: PoolType, diameter: Decimal, depth: Decimal) -> Self {
        Self {
            pool_type,
            geometry: PoolGeometry::Circle { diameter, depth },
        }
    }

    pub fn rectangle(pool_type: PoolType, width: Decimal, length: Decimal, depth: Decimal) -> Self {
        Self {
            pool_type,
            geometry: PoolGeometry::Rectangle {
                width,
                length,
                depth,
            },
        }
    }

    pub fn shape(&self) -> PoolShape {
        self.geometry.shape()
    }

    /// All dimensions must be strictly positive and at most [`MAX_DIMENSION`].
    pub fn validate(&self) -> DomainResult<()> {
        let values = self.geometry.values();
        if values.iter().any(|v| *v <= Decimal::ZERO) {
            return Err(DomainError::validation(
                "pool dimensions must be strictly positive",
            ));
        }
        if values.iter().any(|v| *v > MAX_DIMENSION) {
            return Err(DomainError::validation(format!(
                "pool dimensions must not exceed {MAX_DIMENSION} m"
            )));
        }
        Ok(())
    }

    /// Surface and perimeter used by coefficient pricing.
    ///
    /// Only meaningful for dimensions that passed [`validate`](Self::validate).
    pub fn measurement(&self) -> Measurement {
        match &self.geometry {
            PoolGeometry::Rectangle {
                width,
                length,
                depth,
            } => {
                let perimeter = Decimal::TWO * (*width + *length);
                Measurement {
                    area: *width * *length + perimeter * *depth,
                    perimeter,
                }
            }
            PoolGeometry::Circle { diameter, depth } => {
                let radius = *diameter / Decimal::TWO;
                let perimeter = pi() * *diameter;
                Measurement {
                    area: pi() * radius * radius + perimeter * *depth,
                    perimeter,
                }
            }
        }
    }
}

fn pi() -> Decimal {
    Decimal::new(3_141_592_653_589_793, 15)
}

/// Measured quantities of a pool: inner surface (floor + walls) and rim perimeter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurement {
    /// Square metres.
    pub area: Decimal,
    /// Running metres.
    pub perimeter: Decimal,
}

impl ValueObject for Measurement {}

/// Writer and reader of the pool-code grammar.
pub struct PoolCode;

impl PoolCode {
    /// Format `BAZ-{SHAPE}-{TYPE}-{dims}` with normalized decimals (`1.20` -> `1.2`).
    pub fn format(dims: &PoolDimensions) -> String {
        format!("{POOL_CODE_PREFIX}{SEPARATOR}{}", Self::suffix(dims))
    }

    /// Everything after the `BAZ` prefix: `{SHAPE}-{TYPE}-{dims}`.
    pub fn suffix(dims: &PoolDimensions) -> String {
        let mut segments = vec![
            dims.shape().code_token().to_string(),
            dims.pool_type.code_token().to_string(),
        ];
        segments.extend(dims.geometry.values().into_iter().map(format_dimension));
        segments.join(&SEPARATOR.to_string())
    }

    /// Pool code for a pool whose size is unknown. Never parses to dimensions.
    pub fn format_unsized(shape: PoolShape, pool_type: PoolType) -> String {
        format!(
            "{POOL_CODE_PREFIX}{SEPARATOR}{}",
            Self::unsized_suffix(shape, pool_type)
        )
    }

    pub fn unsized_suffix(shape: PoolShape, pool_type: PoolType) -> String {
        [shape.code_token(), pool_type.code_token(), UNSIZED_MARKER].join(&SEPARATOR.to_string())
    }

    /// Recover structured dimensions from a code.
    ///
    /// Returns `None` for anything that is not a well-formed pool code. Segments
    /// after the dimensions (set marker, collision counter) are ignored.
    pub fn parse(code: &str) -> Option<PoolDimensions> {
        let segments: Vec<&str> = code.trim().split(SEPARATOR).collect();
        if segments.len() < 4 || segments[0] != POOL_CODE_PREFIX {
            return None;
        }

        let shape = PoolShape::from_code_token(segments[1])?;
        let pool_type = PoolType::from_code_token(segments[2])?;
        let dims = &segments[3..];

        let dims = match shape {
            PoolShape::Circle => {
                let [diameter, depth] = parse_dimensions::<2>(dims)?;
                PoolDimensions::circle(pool_type, diameter, depth)
            }
            PoolShape::Rectangle => {
                let [width, length, depth] = parse_dimensions::<3>(dims)?;
                PoolDimensions::rectangle(pool_type, width, length, depth)
            }
        };

        Some(dims)
    }

    /// `true` when the code is exactly a pool code with nothing after the dimensions.
    pub fn is_exact(code: &str) -> bool {
        match Self::parse(code) {
            Some(dims) => {
                let expected = 3 + dims.geometry.values().len();
                code.trim().split(SEPARATOR).count() == expected
            }
            None => false,
        }
    }
}

fn parse_dimensions<const N: usize>(segments: &[&str]) -> Option<[Decimal; N]> {
    if segments.len() < N {
        return None;
    }
    let mut out = [Decimal::ZERO; N];
    for (slot, segment) in out.iter_mut().zip(segments) {
        let value = Decimal::from_str(segment).ok()?;
        if value <= Decimal::ZERO {
            return None;
        }
        *slot = value;
    }
    Some(out)
}

fn format_dimension(value: Decimal) -> String {
    value.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn formats_rectangle_code_with_normalized_decimals() {
        let dims = PoolDimensions::rectangle(PoolType::Skimmer, dec("3.00"), dec("6"), dec("1.20"));
        assert_eq!(PoolCode::format(&dims), "BAZ-OBD-SK-3-6-1.2");
    }

    #[test]
    fn formats_circle_code() {
        let dims = PoolDimensions::circle(PoolType::Overflow, dec("3.6"), dec("1.2"));
        assert_eq!(PoolCode::format(&dims), "BAZ-KRU-PR-3.6-1.2");
    }

    #[test]
    fn parses_rectangle_code() {
        let dims = PoolCode::parse("BAZ-OBD-SK-3-6-1.2").unwrap();
        assert_eq!(dims.shape(), PoolShape::Rectangle);
        assert_eq!(dims.pool_type, PoolType::Skimmer);
        assert_eq!(
            dims.geometry,
            PoolGeometry::Rectangle {
                width: dec("3"),
                length: dec("6"),
                depth: dec("1.2"),
            }
        );
    }

    #[test]
    fn parses_circle_code_ignoring_trailing_segments() {
        let dims = PoolCode::parse("BAZ-KRU-PR-3.6-1.2-SET-2").unwrap();
        assert_eq!(dims, PoolDimensions::circle(PoolType::Overflow, dec("3.6"), dec("1.2")));
    }

    #[test]
    fn rejects_non_pool_codes() {
        assert_eq!(PoolCode::parse("SCHOD-ROM-1200"), None);
        assert_eq!(PoolCode::parse("BAZ-OBD-SK"), None);
        assert_eq!(PoolCode::parse("BAZ"), None);
        assert_eq!(PoolCode::parse(""), None);
        assert_eq!(PoolCode::parse("BAZ-TRI-SK-3-6-1.2"), None);
        assert_eq!(PoolCode::parse("BAZ-OBD-XX-3-6-1.2"), None);
    }

    #[test]
    fn rejects_missing_or_non_numeric_dimensions() {
        assert_eq!(PoolCode::parse("BAZ-OBD-SK-3-6"), None);
        assert_eq!(PoolCode::parse("BAZ-OBD-SK-STD"), None);
        assert_eq!(PoolCode::parse("BAZ-KRU-SK-0-1.2"), None);
        assert_eq!(
            PoolCode::parse(&PoolCode::format_unsized(PoolShape::Circle, PoolType::Skimmer)),
            None
        );
    }

    #[test]
    fn exact_codes_have_no_trailing_segments() {
        assert!(PoolCode::is_exact("BAZ-OBD-SK-3-6-1.2"));
        assert!(!PoolCode::is_exact("BAZ-OBD-SK-3-6-1.2-SET"));
        assert!(!PoolCode::is_exact("BAZ-OBD-SK-3-6-1.2-2"));
        assert!(!PoolCode::is_exact("CHEM-CHL-5"));
    }

    #[test]
    fn rectangle_measurement_covers_floor_and_walls() {
        let dims = PoolDimensions::rectangle(PoolType::Skimmer, dec("3"), dec("6"), dec("1.2"));
        let m = dims.measurement();
        assert_eq!(m.area, dec("39.6"));
        assert_eq!(m.perimeter, dec("18"));
    }

    #[test]
    fn circle_measurement_uses_pi() {
        let dims = PoolDimensions::circle(PoolType::Skimmer, dec("4"), dec("1"));
        let m = dims.measurement();
        // floor 4π + wall 4π
        assert_eq!(m.perimeter.round_dp(4), dec("12.5664"));
        assert_eq!(m.area.round_dp(4), dec("25.1327"));
    }

    #[test]
    fn validate_rejects_zero_dimension() {
        let dims = PoolDimensions::rectangle(PoolType::Skimmer, dec("0"), dec("6"), dec("1.2"));
        assert!(matches!(dims.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn validate_rejects_oversized_dimensions() {
        let dims = PoolDimensions::rectangle(PoolType::Skimmer, dec("1000000000000000"), dec("1000000000000000"), dec("1"));
        assert!(matches!(dims.validate(), Err(DomainError::Validation(_))));

        let edge = PoolDimensions::circle(PoolType::Overflow, MAX_DIMENSION, MAX_DIMENSION);
        assert!(edge.validate().is_ok());
        let m = edge.measurement();
        assert!(m.area > Decimal::ZERO);
    }

    #[test]
    fn serializes_with_shape_and_type_fields() {
        let dims = PoolDimensions::circle(PoolType::Skimmer, dec("3.6"), dec("1.2"));
        let json = serde_json::to_value(&dims).unwrap();
        assert_eq!(json["shape"], "circle");
        assert_eq!(json["type"], "skimmer");
        let back: PoolDimensions = serde_json::from_value(json).unwrap();
        assert_eq!(back, dims);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn dimension() -> impl Strategy<Value = Decimal> {
            (1i64..2000, 0u32..3).prop_map(|(n, scale)| Decimal::new(n, scale))
        }

        proptest! {
            #[test]
            fn rectangle_codes_parse_back(
                w in dimension(),
                l in dimension(),
                d in dimension(),
                overflow in any::<bool>(),
            ) {
                let pool_type = if overflow { PoolType::Overflow } else { PoolType::Skimmer };
                let dims = PoolDimensions::rectangle(pool_type, w, l, d);
                let parsed = PoolCode::parse(&PoolCode::format(&dims)).unwrap();
                prop_assert_eq!(parsed, dims);
            }

            #[test]
            fn parse_never_panics(code in "\\PC{0,40}") {
                let _ = PoolCode::parse(&code);
            }
        }
    }
}

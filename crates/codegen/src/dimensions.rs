//! Measurement extraction from free-text product names.
//!
//! Extraction is best-effort: many legitimate rows carry no measurement at all,
//! so "not found" is an ordinary `None`, never an error. Both `.` and `,` are
//! accepted as decimal separators; returned values are plain decimals.

use std::str::FromStr;

use regex::{Captures, Regex};
use rust_decimal::Decimal;

/// What kind of measurement to look for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DimensionKind {
    /// `W x L x H` or `W x L` (`x`, `×` or `*` separated, `mm`/`cm`/`m` optional).
    Triple,
    /// `N mm`
    Millimetres,
    /// `N kg`
    Kilograms,
    /// `N W` (not kW)
    Watts,
    /// `N kW`
    Kilowatts,
    /// `N°`
    Degrees,
    /// `N l`
    Litres,
    /// `N m³`, `N m3` or `N m3/h`
    CubicMetres,
    /// `N %`
    Percent,
    /// First number in the text, whatever follows it.
    Plain,
}

impl DimensionKind {
    fn pattern(self) -> &'static Regex {
        match self {
            DimensionKind::Triple => regex!(
                r"(?i)(\d+(?:[.,]\d+)?)\s*(mm|cm|m)?\s*[x×*]\s*(\d+(?:[.,]\d+)?)(?:\s*(mm|cm|m)?\s*[x×*]\s*(\d+(?:[.,]\d+)?))?(?:\s*(mm|cm|m)\b)?"
            ),
            DimensionKind::Millimetres => regex!(r"(?i)(\d+(?:[.,]\d+)?)\s*mm\b"),
            DimensionKind::Kilograms => regex!(r"(?i)(\d+(?:[.,]\d+)?)\s*kg\b"),
            DimensionKind::Watts => regex!(r"(?i)(\d+(?:[.,]\d+)?)\s*w\b"),
            DimensionKind::Kilowatts => regex!(r"(?i)(\d+(?:[.,]\d+)?)\s*kw\b"),
            DimensionKind::Degrees => regex!(r"(\d+(?:[.,]\d+)?)\s*°"),
            DimensionKind::Litres => regex!(r"(?i)(\d+(?:[.,]\d+)?)\s*(?:l|litr[ůuy]?)\b"),
            DimensionKind::CubicMetres => regex!(r"(?i)(\d+(?:[.,]\d+)?)\s*m(?:³|3)(?:\s*/\s*h(?:od)?)?"),
            DimensionKind::Percent => regex!(r"(\d+(?:[.,]\d+)?)\s*%"),
            DimensionKind::Plain => regex!(r"(\d+(?:[.,]\d+)?)"),
        }
    }
}

/// Parse a number written with either decimal separator.
pub fn parse_number(raw: &str) -> Option<Decimal> {
    Decimal::from_str(&raw.trim().replace(',', ".")).ok()
}

/// First match of `kind` in `text`, as one value per captured group.
///
/// [`DimensionKind::Triple`] yields two or three values; every other kind yields one.
pub fn extract(text: &str, kind: DimensionKind) -> Option<Vec<Decimal>> {
    let caps = kind.pattern().captures(text)?;
    let values = captured_numbers(&caps)?;
    if values.is_empty() { None } else { Some(values) }
}

/// First single-valued match of `kind` in `text`.
pub fn extract_single(text: &str, kind: DimensionKind) -> Option<Decimal> {
    extract(text, kind)?.into_iter().next()
}

/// [`DimensionKind::Triple`] values converted to metres.
///
/// The last unit written in the match applies to every value; values without
/// any unit are taken as metres.
pub fn extract_lengths(text: &str) -> Option<Vec<Decimal>> {
    let caps = DimensionKind::Triple.pattern().captures(text)?;
    let divisor = caps
        .iter()
        .skip(1)
        .flatten()
        .filter_map(|m| unit_divisor(m.as_str()))
        .last()
        .unwrap_or(Decimal::ONE);
    let values = captured_numbers(&caps)?;
    if values.is_empty() {
        return None;
    }
    Some(values.into_iter().map(|v| v / divisor).collect())
}

fn unit_divisor(token: &str) -> Option<Decimal> {
    match token.to_ascii_lowercase().as_str() {
        "mm" => Some(Decimal::ONE_THOUSAND),
        "cm" => Some(Decimal::ONE_HUNDRED),
        "m" => Some(Decimal::ONE),
        _ => None,
    }
}

fn captured_numbers(caps: &Captures<'_>) -> Option<Vec<Decimal>> {
    caps.iter()
        .skip(1)
        .flatten()
        .filter(|m| unit_divisor(m.as_str()).is_none())
        .map(|m| parse_number(m.as_str()))
        .collect()
}

/// Render a value for use inside a code (`1.50` -> `1.5`).
pub fn code_number(value: Decimal) -> String {
    value.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn triple_with_comma_decimals_and_units() {
        let values = extract("Bazén obdélník 3 x 6 x 1,2 m skimmer", DimensionKind::Triple).unwrap();
        assert_eq!(values, vec![dec("3"), dec("6"), dec("1.2")]);
    }

    #[test]
    fn triple_with_units_between_numbers() {
        let values = extract("Zastřešení 3,5 m × 7,2 m", DimensionKind::Triple).unwrap();
        assert_eq!(values, vec![dec("3.5"), dec("7.2")]);
    }

    #[test]
    fn lengths_are_scaled_to_metres() {
        assert_eq!(
            extract_lengths("Bazén 300 x 600 x 120 cm").unwrap(),
            vec![dec("3"), dec("6"), dec("1.2")]
        );
        assert_eq!(
            extract_lengths("Zastřešení 3500 mm × 7200 mm").unwrap(),
            vec![dec("3.5"), dec("7.2")]
        );
        assert_eq!(
            extract_lengths("Bazén 3 x 6 x 1,2 m").unwrap(),
            vec![dec("3"), dec("6"), dec("1.2")]
        );
        assert_eq!(extract_lengths("Bazén kruh 3,6x1,2").unwrap(), vec![dec("3.6"), dec("1.2")]);
    }

    #[test]
    fn trailing_word_is_not_a_unit() {
        let values = extract("Bazén 3 x 6 x 1,2 modrý", DimensionKind::Triple).unwrap();
        assert_eq!(values, vec![dec("3"), dec("6"), dec("1.2")]);
    }

    #[test]
    fn pair_for_circular_pool() {
        let values = extract("Bazén kruh Ø 3,6x1,2", DimensionKind::Triple).unwrap();
        assert_eq!(values, vec![dec("3.6"), dec("1.2")]);
    }

    #[test]
    fn single_kinds() {
        assert_eq!(extract_single("Schodiště 1200 mm", DimensionKind::Millimetres), Some(dec("1200")));
        assert_eq!(extract_single("Chlor tablety 5 KG", DimensionKind::Kilograms), Some(dec("5")));
        assert_eq!(extract_single("LED světlo 35W", DimensionKind::Watts), Some(dec("35")));
        assert_eq!(extract_single("TČ 12,5 kW", DimensionKind::Kilowatts), Some(dec("12.5")));
        assert_eq!(extract_single("Roh 45°", DimensionKind::Degrees), Some(dec("45")));
        assert_eq!(extract_single("Algicid 1 l", DimensionKind::Litres), Some(dec("1")));
        assert_eq!(extract_single("Protiproud 54 m3/h", DimensionKind::CubicMetres), Some(dec("54")));
        assert_eq!(extract_single("Sleva 10 %", DimensionKind::Percent), Some(dec("10")));
        assert_eq!(extract_single("Kartuše K-12", DimensionKind::Plain), Some(dec("12")));
    }

    #[test]
    fn watts_do_not_match_kilowatts() {
        assert_eq!(extract_single("Tepelné čerpadlo 12 kW", DimensionKind::Watts), None);
    }

    #[test]
    fn not_found_is_none() {
        assert_eq!(extract("Skimmer na fólii", DimensionKind::Triple), None);
        assert_eq!(extract_single("Montáž", DimensionKind::Millimetres), None);
        assert_eq!(extract_single("", DimensionKind::Plain), None);
    }

    #[test]
    fn code_number_drops_trailing_zeros() {
        assert_eq!(code_number(dec("1.50")), "1.5");
        assert_eq!(code_number(dec("12.0")), "12");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn extraction_never_panics(text in "\\PC{0,60}") {
                for kind in [
                    DimensionKind::Triple,
                    DimensionKind::Millimetres,
                    DimensionKind::Kilowatts,
                    DimensionKind::CubicMetres,
                    DimensionKind::Plain,
                ] {
                    let _ = extract(&text, kind);
                }
            }

            #[test]
            fn comma_and_dot_agree(whole in 0u32..10_000, frac in 0u32..100) {
                let dotted = format!("Fólie {whole}.{frac} mm");
                let comma = format!("Fólie {whole},{frac} mm");
                prop_assert_eq!(
                    extract_single(&dotted, DimensionKind::Millimetres),
                    extract_single(&comma, DimensionKind::Millimetres)
                );
            }
        }
    }
}

//! Category rule table: category/subcategory -> code prefix + suffix.
//!
//! Each recognized category is one [`CategoryRule`] variant. Adding a category
//! means adding a variant, a classification arm and a suffix arm; the suffix
//! dispatch is an exhaustive `match`, so a new variant cannot be forgotten.

use rust_decimal::Decimal;

use poolquote_core::{POOL_CODE_PREFIX, PoolCode, PoolDimensions, PoolShape, PoolType};

use crate::dimensions::{DimensionKind, code_number, extract_lengths, extract_single};
use crate::record::RawCatalogRecord;
use crate::text::{brand_token, fold, has_word};

/// Suffix used when a rule finds nothing more specific.
pub const GENERIC_SUFFIX: &str = "STD";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryRule {
    Pool,
    PoolSet,
    Stairs,
    Filtration,
    HeatPump,
    Heating,
    Lighting,
    Counterflow,
    Roofing,
    Chemistry,
    Skimmer,
    Accessories,
    Material,
    Service,
    /// Anything the table does not know; yields `JINE-STD` and a review flag.
    Unrecognized,
}

/// Code before uniqueness disambiguation, split into its two halves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeParts {
    pub prefix: &'static str,
    pub suffix: String,
}

impl CodeParts {
    pub fn base_code(&self) -> String {
        if self.suffix.is_empty() {
            self.prefix.to_string()
        } else {
            format!("{}-{}", self.prefix, self.suffix)
        }
    }
}

impl CategoryRule {
    /// Pick the rule for a category/subcategory pair (case and diacritics insensitive).
    pub fn classify(category: &str, subcategory: &str) -> Self {
        let category = fold(category);
        let subcategory = fold(subcategory);

        match (category.as_str(), subcategory.as_str()) {
            ("sety", _) | (_, "sety") => CategoryRule::PoolSet,
            ("bazeny", _) => CategoryRule::Pool,
            ("schodiste", _) | (_, "schodiste") => CategoryRule::Stairs,
            ("filtrace", _) | ("technologie", "filtrace") => CategoryRule::Filtration,
            ("tepelna cerpadla", _) | ("technologie", "tepelna cerpadla") => CategoryRule::HeatPump,
            ("ohrev", _) | ("technologie", "ohrev") => CategoryRule::Heating,
            ("osvetleni", _) | ("technologie", "osvetleni") => CategoryRule::Lighting,
            ("protiproud", _) | ("technologie", "protiproud") => CategoryRule::Counterflow,
            ("skimmery", _) | ("technologie", "skimmery") => CategoryRule::Skimmer,
            ("zastreseni", _) => CategoryRule::Roofing,
            ("chemie", _) => CategoryRule::Chemistry,
            ("prislusenstvi", _) => CategoryRule::Accessories,
            ("materialy", _) | ("material", _) => CategoryRule::Material,
            ("sluzby", _) => CategoryRule::Service,
            _ => CategoryRule::Unrecognized,
        }
    }

    pub fn is_recognized(self) -> bool {
        self != CategoryRule::Unrecognized
    }

    pub fn prefix(self) -> &'static str {
        match self {
            CategoryRule::Pool | CategoryRule::PoolSet => POOL_CODE_PREFIX,
            CategoryRule::Stairs => "SCHOD",
            CategoryRule::Filtration => "FILT",
            CategoryRule::HeatPump => "TC",
            CategoryRule::Heating => "OHR",
            CategoryRule::Lighting => "SVET",
            CategoryRule::Counterflow => "PROT",
            CategoryRule::Roofing => "ZAST",
            CategoryRule::Chemistry => "CHEM",
            CategoryRule::Skimmer => "SKIM",
            CategoryRule::Accessories => "PRIS",
            CategoryRule::Material => "MAT",
            CategoryRule::Service => "SLUZ",
            CategoryRule::Unrecognized => "JINE",
        }
    }

    /// Categories whose codes end with the brand.
    pub fn is_brand_sensitive(self) -> bool {
        matches!(self, CategoryRule::HeatPump | CategoryRule::Skimmer)
    }

    /// Build the code halves for `record`.
    pub fn code_parts(self, record: &RawCatalogRecord) -> CodeParts {
        let name = record.name.as_str();
        let folded = fold(name);

        let mut segments: Vec<String> = match self {
            CategoryRule::Pool => vec![pool_suffix(name, &folded)],
            CategoryRule::PoolSet => vec![pool_suffix(name, &folded), "SET".to_string()],
            CategoryRule::Stairs => {
                let marker = marker(&folded, &[("roman", "ROM"), ("roh", "ROH"), ("vnitr", "VNI"), ("vestav", "VNI")]);
                with_value(marker, extract_single(name, DimensionKind::Millimetres))
            }
            CategoryRule::Filtration => {
                let marker = marker(&folded, &[("pisk", "PIS"), ("kartus", "KAR"), ("cerpadl", "CER")]);
                let size = extract_single(name, DimensionKind::Millimetres)
                    .or_else(|| extract_single(name, DimensionKind::CubicMetres))
                    .or_else(|| extract_single(name, DimensionKind::Kilograms));
                with_value(marker, size)
            }
            CategoryRule::HeatPump => values(extract_single(name, DimensionKind::Kilowatts)),
            CategoryRule::Heating => {
                let marker = marker(&folded, &[("elektr", "EL"), ("solar", "SOL"), ("vymenik", "VYM")]);
                with_value(marker, extract_single(name, DimensionKind::Kilowatts))
            }
            CategoryRule::Lighting => {
                let marker = marker(&folded, &[("led", "LED"), ("halogen", "HAL")]);
                with_value(marker, extract_single(name, DimensionKind::Watts))
            }
            CategoryRule::Counterflow => values(extract_single(name, DimensionKind::CubicMetres)),
            CategoryRule::Roofing => {
                let marker = marker(&folded, &[("nizk", "NIZ"), ("vysok", "VYS")]);
                let mut segments = vec![marker.to_string()];
                if let Some(dims) = extract_lengths(name) {
                    segments.extend(dims.into_iter().map(code_number));
                }
                segments
            }
            CategoryRule::Chemistry => {
                let marker = chemistry_marker(&folded);
                let amount = extract_single(name, DimensionKind::Kilograms)
                    .or_else(|| extract_single(name, DimensionKind::Litres));
                with_value(marker, amount)
            }
            CategoryRule::Skimmer => {
                vec![marker(&folded, &[("beton", "BET"), ("foli", "FOL")]).to_string()]
            }
            CategoryRule::Accessories => {
                with_value(GENERIC_SUFFIX, extract_single(name, DimensionKind::Millimetres))
            }
            CategoryRule::Material => {
                let marker = marker(&folded, &[("foli", "FOL"), ("trub", "TRUB")]);
                with_value(marker, extract_single(name, DimensionKind::Millimetres))
            }
            CategoryRule::Service => {
                vec![marker(&folded, &[("montaz", "MONT"), ("doprav", "DOP"), ("servis", "SERV")]).to_string()]
            }
            CategoryRule::Unrecognized => vec![GENERIC_SUFFIX.to_string()],
        };

        if self.is_brand_sensitive() {
            if let Some(brand) = record.brand.as_deref().and_then(brand_token) {
                segments.push(brand);
            }
        }
        if segments.is_empty() {
            segments.push(GENERIC_SUFFIX.to_string());
        }

        CodeParts {
            prefix: self.prefix(),
            suffix: segments.join("-"),
        }
    }
}

/// `{SHAPE}-{TYPE}-{dims}` through the shared pool-code grammar.
fn pool_suffix(name: &str, folded: &str) -> String {
    let shape = if ["kruh", "kulat", "ø"].iter().any(|k| folded.contains(k)) {
        PoolShape::Circle
    } else {
        PoolShape::Rectangle
    };
    let pool_type = if folded.contains("preliv") {
        PoolType::Overflow
    } else {
        PoolType::Skimmer
    };

    pool_dimensions(name, shape, pool_type)
        .map(|dims| PoolCode::suffix(&dims))
        .unwrap_or_else(|| PoolCode::unsized_suffix(shape, pool_type))
}

fn pool_dimensions(name: &str, shape: PoolShape, pool_type: PoolType) -> Option<PoolDimensions> {
    let values = extract_lengths(name)?;
    let dims = match (shape, values.as_slice()) {
        (PoolShape::Circle, [diameter, depth, ..]) => PoolDimensions::circle(pool_type, *diameter, *depth),
        (PoolShape::Rectangle, [width, length, depth]) => {
            PoolDimensions::rectangle(pool_type, *width, *length, *depth)
        }
        _ => return None,
    };
    dims.validate().ok()?;
    Some(dims)
}

fn marker(folded: &str, table: &[(&str, &'static str)]) -> &'static str {
    table
        .iter()
        .find(|(needle, _)| folded.contains(needle))
        .map(|(_, marker)| *marker)
        .unwrap_or(GENERIC_SUFFIX)
}

fn chemistry_marker(folded: &str) -> &'static str {
    if folded.contains("chlor") {
        "CHL"
    } else if has_word(folded, "ph") {
        "PH"
    } else if folded.contains("algicid") {
        "ALG"
    } else if folded.contains("flok") || folded.contains("vlock") {
        "FLOK"
    } else {
        "OST"
    }
}

fn with_value(marker: &str, value: Option<Decimal>) -> Vec<String> {
    let mut segments = vec![marker.to_string()];
    segments.extend(value.map(code_number));
    segments
}

fn values(value: Option<Decimal>) -> Vec<String> {
    value.map(code_number).into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, category: &str, subcategory: &str) -> RawCatalogRecord {
        RawCatalogRecord {
            name: name.to_string(),
            category: Some(category.to_string()),
            subcategory: Some(subcategory.to_string()),
            ..RawCatalogRecord::default()
        }
    }

    fn base_code(r: &RawCatalogRecord) -> String {
        let rule = CategoryRule::classify(
            r.category.as_deref().unwrap_or_default(),
            r.subcategory.as_deref().unwrap_or_default(),
        );
        rule.code_parts(r).base_code()
    }

    #[test]
    fn classify_ignores_case_and_diacritics() {
        assert_eq!(CategoryRule::classify("Bazény", ""), CategoryRule::Pool);
        assert_eq!(CategoryRule::classify("Technologie", "Tepelná čerpadla"), CategoryRule::HeatPump);
        assert_eq!(CategoryRule::classify("Příslušenství", "Schodiště"), CategoryRule::Stairs);
        assert_eq!(CategoryRule::classify("bazeny", "sety"), CategoryRule::PoolSet);
        assert_eq!(CategoryRule::classify("Nábytek", "židle"), CategoryRule::Unrecognized);
    }

    #[test]
    fn rectangular_skimmer_pool() {
        let r = record("Bazén obdélník 3 x 6 x 1,2 m skimmer", "bazeny", "obdelnik");
        assert_eq!(base_code(&r), "BAZ-OBD-SK-3-6-1.2");
    }

    #[test]
    fn circular_overflow_pool() {
        let r = record("Bazén kruhový přelivový Ø 3,6 x 1,2 m", "bazeny", "kruhove");
        assert_eq!(base_code(&r), "BAZ-KRU-PR-3.6-1.2");
    }

    #[test]
    fn centimetre_pool_code_is_written_in_metres() {
        let r = record("Bazén obdélník 300 x 600 x 120 cm", "bazeny", "obdelnik");
        let code = base_code(&r);
        assert_eq!(code, "BAZ-OBD-SK-3-6-1.2");
        assert_eq!(
            PoolCode::parse(&code),
            Some(PoolDimensions::rectangle(
                PoolType::Skimmer,
                Decimal::from(3),
                Decimal::from(6),
                Decimal::new(12, 1),
            ))
        );
    }

    #[test]
    fn pool_without_dimensions_gets_unsized_code() {
        let r = record("Bazén na míru, obdélník", "bazeny", "");
        assert_eq!(base_code(&r), "BAZ-OBD-SK-STD");
    }

    #[test]
    fn pool_set_carries_set_marker() {
        let r = record("Set bazén 3 x 6 x 1,2 s filtrací", "sety", "");
        assert_eq!(base_code(&r), "BAZ-OBD-SK-3-6-1.2-SET");
    }

    #[test]
    fn stairs_with_width() {
        let r = record("Schodiště románské 1200 mm", "prislusenstvi", "schodiste");
        assert_eq!(base_code(&r), "SCHOD-ROM-1200");
    }

    #[test]
    fn heat_pump_is_brand_sensitive() {
        let mut r = record("Tepelné čerpadlo Inverter 12,5 kW", "technologie", "tepelna cerpadla");
        r.brand = Some("Hayward".to_string());
        assert_eq!(base_code(&r), "TC-12.5-HAYWAR");

        r.brand = None;
        assert_eq!(base_code(&r), "TC-12.5");
    }

    #[test]
    fn heat_pump_without_anything_is_generic() {
        let r = record("Tepelné čerpadlo", "tepelna cerpadla", "");
        assert_eq!(base_code(&r), "TC-STD");
    }

    #[test]
    fn skimmer_with_brand() {
        let mut r = record("Skimmer pro fóliové bazény", "technologie", "skimmery");
        r.brand = Some("Astral Pool".to_string());
        assert_eq!(base_code(&r), "SKIM-FOL-ASTRAL");
    }

    #[test]
    fn chemistry_markers() {
        assert_eq!(base_code(&record("Chlor tablety 5 kg", "chemie", "")), "CHEM-CHL-5");
        assert_eq!(base_code(&record("pH mínus 1,5 kg", "chemie", "")), "CHEM-PH-1.5");
        assert_eq!(base_code(&record("Algicid 1 l", "chemie", "")), "CHEM-ALG-1");
        assert_eq!(base_code(&record("Tester vody", "chemie", "")), "CHEM-OST");
    }

    #[test]
    fn lighting_counterflow_roofing() {
        assert_eq!(base_code(&record("LED světlo 35 W", "technologie", "osvetleni")), "SVET-LED-35");
        assert_eq!(base_code(&record("Protiproud 54 m3/h", "technologie", "protiproud")), "PROT-54");
        assert_eq!(
            base_code(&record("Zastřešení nízké 3,5 x 7,2", "zastreseni", "")),
            "ZAST-NIZ-3.5-7.2"
        );
    }

    #[test]
    fn services_and_materials() {
        assert_eq!(base_code(&record("Montáž bazénu", "sluzby", "")), "SLUZ-MONT");
        assert_eq!(base_code(&record("Doprava do 50 km", "sluzby", "")), "SLUZ-DOP");
        assert_eq!(base_code(&record("Bazénová fólie 1,5 mm", "materialy", "")), "MAT-FOL-1.5");
    }

    #[test]
    fn unrecognized_category_falls_through() {
        assert_eq!(base_code(&record("Lehátko", "zahrada", "nabytek")), "JINE-STD");
    }
}

use rust_decimal::Decimal;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::dimensions::parse_number;

/// One row of the raw product export, before normalization.
///
/// Every field except `name` may be missing; the export is hand-maintained and
/// inconsistently coded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCatalogRecord {
    pub name: String,
    /// Unreadable prices (`"n/a"`, `"na dotaz"`) become `None` and are flagged
    /// downstream; the row itself is kept.
    #[serde(deserialize_with = "lenient_price")]
    pub price: Option<Decimal>,
    pub unit: Option<String>,
    pub code: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub product_type: Option<String>,
    pub brand: Option<String>,
    pub description: Option<String>,
    /// Where the row came from (sheet, line), kept for traceability.
    #[serde(alias = "source_line")]
    pub source: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PriceField {
    Number(Decimal),
    Text(String),
    Other(IgnoredAny),
}

/// Accepts numbers, decimal strings with `,` or `.` and spaced thousands
/// (`"1 290,50"`).
fn lenient_price<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<PriceField>::deserialize(deserializer)? {
        Some(PriceField::Number(value)) => Some(value),
        Some(PriceField::Text(raw)) => {
            let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
            parse_number(&compact)
        }
        Some(PriceField::Other(_)) | None => None,
    })
}

impl RawCatalogRecord {
    pub fn category(&self) -> &str {
        self.category.as_deref().unwrap_or_default().trim()
    }

    pub fn subcategory(&self) -> &str {
        self.subcategory.as_deref().unwrap_or_default().trim()
    }
}

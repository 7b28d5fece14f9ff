use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use poolquote_catalog::{Unit, round_to_currency};
use poolquote_core::CatalogItemId;

/// How a quote line came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemSource {
    /// Selected through the configuration.
    Catalog,
    /// Attached because a selected row requires it.
    Surcharge,
    /// Typed in by hand; has no catalog row.
    Manual,
}

/// One priced quote line.
///
/// Once handed to the caller the line is theirs: quantity and price edits are
/// preserved by later merges and totals are never re-derived here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedQuoteItem {
    pub product_id: Option<CatalogItemId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub name: String,
    pub category: String,
    pub quantity: Decimal,
    pub unit: Unit,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    /// Configuration contexts that requested this line.
    #[serde(default)]
    pub variants: BTreeSet<String>,
    pub source: ItemSource,
}

impl GeneratedQuoteItem {
    /// Hand-entered line with no catalog backing.
    pub fn freehand(
        name: impl Into<String>,
        category: impl Into<String>,
        quantity: Decimal,
        unit: Unit,
        unit_price: Decimal,
        currency_places: u32,
    ) -> Self {
        Self {
            product_id: None,
            code: None,
            name: name.into(),
            category: category.into(),
            quantity,
            unit,
            unit_price,
            total_price: round_to_currency(quantity * unit_price, currency_places),
            variants: BTreeSet::new(),
            source: ItemSource::Manual,
        }
    }

    pub fn is_freehand(&self) -> bool {
        self.product_id.is_none()
    }

    /// Same line as `other`: identical product id, or, when either side has
    /// none, the same name ignoring case.
    pub fn matches(&self, other: &GeneratedQuoteItem) -> bool {
        match (self.product_id, other.product_id) {
            (Some(a), Some(b)) => a == b,
            _ => self.name.trim().to_lowercase() == other.name.trim().to_lowercase(),
        }
    }
}

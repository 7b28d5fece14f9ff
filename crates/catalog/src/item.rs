use std::collections::BTreeSet;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use poolquote_core::{CatalogItemId, DomainError, Entity};

use crate::error::CatalogError;

/// Role of a product within a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    Core,
    Addon,
    Material,
    Service,
}

impl ProductType {
    pub fn as_str(self) -> &'static str {
        match self {
            ProductType::Core => "core",
            ProductType::Addon => "addon",
            ProductType::Material => "material",
            ProductType::Service => "service",
        }
    }
}

impl FromStr for ProductType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "core" => Ok(ProductType::Core),
            "addon" => Ok(ProductType::Addon),
            "material" => Ok(ProductType::Material),
            "service" => Ok(ProductType::Service),
            other => Err(DomainError::unknown("product type", other)),
        }
    }
}

/// Unit of sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "ks")]
    Piece,
    #[serde(rename = "m")]
    Metre,
    #[serde(rename = "m²")]
    SquareMetre,
    #[serde(rename = "m³")]
    CubicMetre,
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "l")]
    Litre,
    #[serde(rename = "hod")]
    Hour,
    #[serde(rename = "km")]
    Kilometre,
    #[serde(rename = "bal")]
    Package,
    #[serde(rename = "sada")]
    Set,
}

impl Unit {
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Piece => "ks",
            Unit::Metre => "m",
            Unit::SquareMetre => "m²",
            Unit::CubicMetre => "m³",
            Unit::Kilogram => "kg",
            Unit::Litre => "l",
            Unit::Hour => "hod",
            Unit::Kilometre => "km",
            Unit::Package => "bal",
            Unit::Set => "sada",
        }
    }
}

impl FromStr for Unit {
    type Err = DomainError;

    /// Accepts the spellings found in supplier exports (`m2`, `bm`, `kus`, `ks.`...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unit = s.trim().trim_end_matches('.').to_lowercase();
        match unit.as_str() {
            "ks" | "kus" | "kusy" | "pc" | "pcs" => Ok(Unit::Piece),
            "m" | "bm" | "mb" => Ok(Unit::Metre),
            "m²" | "m2" => Ok(Unit::SquareMetre),
            "m³" | "m3" => Ok(Unit::CubicMetre),
            "kg" => Ok(Unit::Kilogram),
            "l" | "litr" => Ok(Unit::Litre),
            "hod" | "h" => Ok(Unit::Hour),
            "km" => Ok(Unit::Kilometre),
            "bal" | "balení" => Ok(Unit::Package),
            "sada" | "set" => Ok(Unit::Set),
            other => Err(DomainError::unknown("unit", other)),
        }
    }
}

/// Measured quantity a coefficient price is multiplied by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoefficientUnit {
    /// Pool surface area.
    M2,
    /// Running metres of the pool perimeter.
    Bm,
}

/// Pricing strategy tag, for display and export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceType {
    Fixed,
    Percentage,
    Coefficient,
}

impl PriceType {
    pub fn as_str(self) -> &'static str {
        match self {
            PriceType::Fixed => "fixed",
            PriceType::Percentage => "percentage",
            PriceType::Coefficient => "coefficient",
        }
    }
}

/// Pricing strategy with exactly the fields its type needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "price_type", rename_all = "lowercase")]
pub enum Pricing {
    Fixed {
        unit_price: Decimal,
    },
    Percentage {
        reference_product_id: CatalogItemId,
        percentage: Decimal,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        minimum_price: Option<Decimal>,
    },
    Coefficient {
        coefficient: Decimal,
        coefficient_unit: CoefficientUnit,
    },
}

impl Pricing {
    pub fn fixed(unit_price: Decimal) -> Self {
        Pricing::Fixed { unit_price }
    }

    pub fn price_type(&self) -> PriceType {
        match self {
            Pricing::Fixed { .. } => PriceType::Fixed,
            Pricing::Percentage { .. } => PriceType::Percentage,
            Pricing::Coefficient { .. } => PriceType::Coefficient,
        }
    }

    /// Fixed unit price, if this is a fixed-priced item.
    pub fn unit_price(&self) -> Option<Decimal> {
        match self {
            Pricing::Fixed { unit_price } => Some(*unit_price),
            _ => None,
        }
    }
}

/// A priced, orderable catalog row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: CatalogItemId,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_code: Option<String>,
    pub name: String,
    pub category: String,
    pub subcategory: String,
    pub product_type: ProductType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub unit: Unit,
    #[serde(flatten)]
    pub pricing: Pricing,
    #[serde(default)]
    pub required_surcharge_ids: BTreeSet<CatalogItemId>,
    pub active: bool,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl Entity for CatalogItem {
    type Id = CatalogItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl CatalogItem {
    /// Active fixed-priced piece item; adjust the rest with the `with_*` setters.
    pub fn new(
        id: CatalogItemId,
        code: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        subcategory: impl Into<String>,
        pricing: Pricing,
    ) -> Self {
        Self {
            id,
            code: code.into(),
            old_code: None,
            name: name.into(),
            category: category.into(),
            subcategory: subcategory.into(),
            product_type: ProductType::Addon,
            brand: None,
            unit: Unit::Piece,
            pricing,
            required_surcharge_ids: BTreeSet::new(),
            active: true,
            tags: BTreeSet::new(),
        }
    }

    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_product_type(mut self, product_type: ProductType) -> Self {
        self.product_type = product_type;
        self
    }

    pub fn with_surcharge(mut self, surcharge: CatalogItemId) -> Self {
        self.required_surcharge_ids.insert(surcharge);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn price_type(&self) -> PriceType {
        self.pricing.price_type()
    }

    /// Inactive rows stay in the catalog for history but are never quoted.
    pub fn is_selectable(&self) -> bool {
        self.active
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag.trim()))
    }

    /// Row-local invariants. Cross-row references are checked by [`crate::Catalog`].
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.code.trim().is_empty() {
            return Err(CatalogError::invalid(&self.name, "code cannot be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(CatalogError::invalid(&self.code, "name cannot be empty"));
        }

        match &self.pricing {
            Pricing::Fixed { unit_price } => {
                if *unit_price < Decimal::ZERO {
                    return Err(CatalogError::invalid(&self.code, "unit_price must be non-negative"));
                }
            }
            Pricing::Percentage {
                reference_product_id,
                percentage,
                minimum_price,
            } => {
                if *reference_product_id == self.id {
                    return Err(CatalogError::SelfReference {
                        code: self.code.clone(),
                    });
                }
                if *percentage <= Decimal::ZERO {
                    return Err(CatalogError::invalid(&self.code, "percentage must be positive"));
                }
                if minimum_price.is_some_and(|m| m < Decimal::ZERO) {
                    return Err(CatalogError::invalid(
                        &self.code,
                        "minimum_price must be non-negative",
                    ));
                }
            }
            Pricing::Coefficient { coefficient, .. } => {
                if *coefficient <= Decimal::ZERO {
                    return Err(CatalogError::invalid(&self.code, "coefficient must be positive"));
                }
            }
        }

        if self.required_surcharge_ids.contains(&self.id) {
            return Err(CatalogError::invalid(&self.code, "item requires itself as a surcharge"));
        }

        Ok(())
    }
}

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use poolquote_catalog::{
    Catalog, CatalogItem, Pricing, PricingError, Unit, resolve_price, round_to_currency,
};
use poolquote_core::{ConfigurationId, Measurement, PoolCode};

use crate::configuration::{OptionCategory, PoolConfiguration, Selection};
use crate::error::ResolveError;
use crate::item::{GeneratedQuoteItem, ItemSource};
use crate::merge::merge_items;
use crate::selection::Criterion;
use crate::surcharge::expand_surcharges;

/// Decimal places kept on measured quantities (m², m).
const QUANTITY_PLACES: u32 = 2;

/// Knobs for quote resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteSettings {
    /// Decimal places line totals are rounded to.
    pub currency_places: u32,
}

impl Default for QuoteSettings {
    fn default() -> Self {
        Self { currency_places: 2 }
    }
}

impl QuoteSettings {
    pub fn with_currency_places(mut self, places: u32) -> Self {
        self.currency_places = places;
        self
    }
}

/// Input of one online resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub configuration_id: ConfigurationId,
    pub configuration: PoolConfiguration,
    #[serde(default)]
    pub existing_items: Vec<GeneratedQuoteItem>,
}

/// Result of one resolution: merged items plus the selections the catalog
/// could not satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResolution {
    pub items: Vec<GeneratedQuoteItem>,
    /// Unmatched selections. A missing pool is reported as a `pool` selection
    /// whose value is the expected pool code.
    pub missing: Vec<Selection>,
    /// Number of items not present before this resolution.
    pub appended: usize,
}

/// Resolves configurations against one catalog snapshot.
///
/// Pure per call: the same configuration, catalog and existing items always
/// produce the same resolution.
#[derive(Debug, Clone, Copy)]
pub struct QuoteResolver<'a> {
    catalog: &'a Catalog,
    settings: QuoteSettings,
}

impl<'a> QuoteResolver<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            settings: QuoteSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: QuoteSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn handle(&self, request: &QuoteRequest) -> Result<QuoteResolution, ResolveError> {
        self.resolve(
            request.configuration_id,
            &request.configuration,
            &request.existing_items,
        )
    }

    /// Resolve `configuration` and merge the result into a copy of `existing`.
    ///
    /// On error nothing is merged and `existing` is left as it was.
    pub fn resolve(
        &self,
        configuration_id: ConfigurationId,
        configuration: &PoolConfiguration,
        existing: &[GeneratedQuoteItem],
    ) -> Result<QuoteResolution, ResolveError> {
        let result = self.generate(configuration_id, configuration);
        let (generated, missing) = match result {
            Ok(generated) => generated,
            Err(err) => {
                tracing::warn!(configuration_id = %configuration_id, error = %err, "quote resolution failed");
                return Err(err);
            }
        };

        let mut items = existing.to_vec();
        let appended = merge_items(&mut items, generated);
        tracing::debug!(
            configuration_id = %configuration_id,
            items = items.len(),
            appended,
            missing = missing.len(),
            "quote resolved"
        );

        Ok(QuoteResolution {
            items,
            missing,
            appended,
        })
    }

    fn generate(
        &self,
        configuration_id: ConfigurationId,
        configuration: &PoolConfiguration,
    ) -> Result<(Vec<GeneratedQuoteItem>, Vec<Selection>), ResolveError> {
        configuration.pool.validate()?;
        let measurement = configuration.pool.measurement();

        let mut generated = Vec::new();
        let mut missing = Vec::new();

        for criterion in Criterion::from_configuration(configuration) {
            let requested = match &criterion {
                Criterion::Pool { dimensions, .. } => Selection {
                    option: OptionCategory::Pool,
                    value: PoolCode::format(dimensions),
                },
                Criterion::Option(selection) => selection.clone(),
            };
            let label = format!("{configuration_id}:{}", requested.option);

            let Some(row) = criterion.find(self.catalog) else {
                tracing::warn!(
                    option = %requested.option,
                    value = %requested.value,
                    "no catalog row for selection"
                );
                missing.push(requested);
                continue;
            };

            generated.push(self.line(row, ItemSource::Catalog, &label, &measurement)?);
            for surcharge in expand_surcharges(row, self.catalog)? {
                generated.push(self.line(surcharge, ItemSource::Surcharge, &label, &measurement)?);
            }
        }

        Ok((generated, missing))
    }

    fn line(
        &self,
        row: &CatalogItem,
        source: ItemSource,
        label: &str,
        measurement: &Measurement,
    ) -> Result<GeneratedQuoteItem, ResolveError> {
        let unit_price = resolve_price(row, self.catalog, Some(measurement))?;
        let quantity = quantity_for(row, measurement);
        let total = quantity
            .checked_mul(unit_price)
            .ok_or_else(|| PricingError::Overflow {
                code: row.code.clone(),
            })?;

        Ok(GeneratedQuoteItem {
            product_id: Some(row.id),
            code: Some(row.code.clone()),
            name: row.name.clone(),
            category: row.category.clone(),
            quantity,
            unit: row.unit,
            unit_price,
            total_price: round_to_currency(total, self.settings.currency_places),
            variants: [label.to_string()].into(),
            source,
        })
    }
}

/// Default quantity of a catalog row for one pool.
///
/// Coefficient prices already include the measurement, so they count once.
fn quantity_for(row: &CatalogItem, measurement: &Measurement) -> Decimal {
    if matches!(row.pricing, Pricing::Coefficient { .. }) {
        return Decimal::ONE;
    }
    let measured = match row.unit {
        Unit::SquareMetre => measurement.area,
        Unit::Metre => measurement.perimeter,
        _ => return Decimal::ONE,
    };
    measured.round_dp_with_strategy(QUANTITY_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Resolve `configuration` against `catalog` with default settings and merge
/// into `existing`.
pub fn resolve_quote_items(
    configuration_id: ConfigurationId,
    configuration: &PoolConfiguration,
    catalog: &Catalog,
    existing: &[GeneratedQuoteItem],
) -> Result<Vec<GeneratedQuoteItem>, ResolveError> {
    QuoteResolver::new(catalog)
        .resolve(configuration_id, configuration, existing)
        .map(|resolution| resolution.items)
}

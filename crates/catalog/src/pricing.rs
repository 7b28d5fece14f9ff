//! Unit price resolution for the three pricing strategies.
//!
//! Resolution never rounds: rounding to currency granularity happens once, when
//! a line total is computed (see [`round_to_currency`]), so resolving the same
//! item repeatedly always yields the same exact value.

use rust_decimal::{Decimal, RoundingStrategy};

use poolquote_core::Measurement;

use crate::catalog::CatalogLookup;
use crate::error::PricingError;
use crate::item::{CatalogItem, CoefficientUnit, Pricing};

/// Resolve the unit price of `item`.
///
/// - fixed: the item's own unit price
/// - percentage: `reference.unit_price * percentage / 100`, floored at `minimum_price`
/// - coefficient: `coefficient * area` (m2) or `coefficient * perimeter` (bm)
///
/// A percentage reference that is missing or not fixed-priced, and a
/// coefficient item without a measurement, are errors; neither is ever priced
/// as zero. A product outside the `Decimal` range is [`PricingError::Overflow`].
pub fn resolve_price<L>(
    item: &CatalogItem,
    catalog: &L,
    measurement: Option<&Measurement>,
) -> Result<Decimal, PricingError>
where
    L: CatalogLookup + ?Sized,
{
    match &item.pricing {
        Pricing::Fixed { unit_price } => Ok(*unit_price),
        Pricing::Percentage {
            reference_product_id,
            percentage,
            minimum_price,
        } => {
            let reference = catalog.find(reference_product_id).ok_or_else(|| {
                PricingError::UnresolvableReference {
                    code: item.code.clone(),
                    reference: *reference_product_id,
                }
            })?;
            let base = reference
                .pricing
                .unit_price()
                .ok_or_else(|| PricingError::ReferenceNotFixed {
                    code: item.code.clone(),
                    reference_code: reference.code.clone(),
                })?;

            let raw = base
                .checked_mul(*percentage)
                .map(|v| v / Decimal::ONE_HUNDRED)
                .ok_or_else(|| PricingError::Overflow {
                    code: item.code.clone(),
                })?;
            Ok(match minimum_price {
                Some(minimum) if raw < *minimum => *minimum,
                _ => raw,
            })
        }
        Pricing::Coefficient {
            coefficient,
            coefficient_unit,
        } => {
            let measurement = measurement.ok_or_else(|| PricingError::MissingMeasurement {
                code: item.code.clone(),
            })?;
            let measured = match coefficient_unit {
                CoefficientUnit::M2 => measurement.area,
                CoefficientUnit::Bm => measurement.perimeter,
            };
            coefficient
                .checked_mul(measured)
                .ok_or_else(|| PricingError::Overflow {
                    code: item.code.clone(),
                })
        }
    }
}

/// Round a money amount to `places` decimals, half away from zero.
pub fn round_to_currency(value: Decimal, places: u32) -> Decimal {
    value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

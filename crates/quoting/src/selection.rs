//! Catalog selection criteria and matchers.

use poolquote_catalog::{Catalog, CatalogItem};
use poolquote_core::{PoolCode, PoolDimensions};

use crate::configuration::{PoolConfiguration, Selection};

/// Pool category in the catalog.
pub const POOL_CATEGORY: &str = "bazeny";

/// One thing the configuration asks the catalog for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    Pool {
        dimensions: PoolDimensions,
        color: Option<String>,
    },
    Option(Selection),
}

impl Criterion {
    /// Pool first, then options in configuration order.
    pub fn from_configuration(configuration: &PoolConfiguration) -> Vec<Criterion> {
        let mut criteria = vec![Criterion::Pool {
            dimensions: configuration.pool.clone(),
            color: configuration.color.clone(),
        }];
        criteria.extend(configuration.selections().into_iter().map(Criterion::Option));
        criteria
    }

    pub fn find<'a>(&self, catalog: &'a Catalog) -> Option<&'a CatalogItem> {
        match self {
            Criterion::Pool { dimensions, color } => find_pool(catalog, dimensions, color.as_deref()),
            Criterion::Option(selection) => find_option(catalog, selection),
        }
    }
}

/// Pool row whose code encodes exactly `dimensions`.
///
/// Equality is numeric, never nearest-match. Among several candidates a row
/// tagged with the wanted color wins, then a code without trailing segments,
/// then catalog order. Rows whose code does not parse are simply not pools.
pub fn find_pool<'a>(
    catalog: &'a Catalog,
    dimensions: &PoolDimensions,
    color: Option<&str>,
) -> Option<&'a CatalogItem> {
    catalog
        .selectable_in(POOL_CATEGORY, None)
        .filter(|item| PoolCode::parse(&item.code).as_ref() == Some(dimensions))
        .min_by_key(|item| {
            let color_miss = color.is_some_and(|c| !item.has_tag(c));
            (color_miss, !PoolCode::is_exact(&item.code))
        })
}

/// Row for one chosen option: same catalog section, code equal to the value or
/// tagged with it.
pub fn find_option<'a>(catalog: &'a Catalog, selection: &Selection) -> Option<&'a CatalogItem> {
    let (category, subcategory) = selection.option.catalog_section()?;
    let wanted = selection.value.trim();
    let mut section = catalog.selectable_in(category, Some(subcategory));
    section.find(|item| item.code.eq_ignore_ascii_case(wanted) || item.has_tag(wanted))
}

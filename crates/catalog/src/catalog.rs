use std::collections::{HashMap, HashSet};

use poolquote_core::CatalogItemId;

use crate::error::CatalogError;
use crate::item::{CatalogItem, Pricing};

/// Read access to catalog rows by id.
///
/// Price resolution only needs lookups, so it accepts either a validated
/// [`Catalog`] or a raw slice of rows.
pub trait CatalogLookup {
    fn find(&self, id: &CatalogItemId) -> Option<&CatalogItem>;
}

impl CatalogLookup for [CatalogItem] {
    fn find(&self, id: &CatalogItemId) -> Option<&CatalogItem> {
        self.iter().find(|item| item.id == *id)
    }
}

/// Validated catalog snapshot.
///
/// Construction checks every cross-row invariant once, so quote resolution
/// never has to discover a broken reference lazily:
/// - ids and codes are unique,
/// - percentage items reference an existing fixed-priced item (one hop, never self),
/// - required surcharges exist.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    by_id: HashMap<CatalogItemId, usize>,
}

impl Catalog {
    pub fn new(items: Vec<CatalogItem>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(items.len());
        let mut codes = HashSet::with_capacity(items.len());

        for (idx, item) in items.iter().enumerate() {
            item.validate()?;
            if by_id.insert(item.id, idx).is_some() {
                return Err(CatalogError::DuplicateId(item.id));
            }
            if !codes.insert(item.code.as_str()) {
                return Err(CatalogError::DuplicateCode(item.code.clone()));
            }
        }

        for item in &items {
            if let Pricing::Percentage {
                reference_product_id,
                ..
            } = &item.pricing
            {
                let reference = by_id.get(reference_product_id).map(|&idx| &items[idx]).ok_or_else(
                    || CatalogError::DanglingReference {
                        code: item.code.clone(),
                        reference: *reference_product_id,
                    },
                )?;
                if !matches!(reference.pricing, Pricing::Fixed { .. }) {
                    return Err(CatalogError::ReferenceNotFixed {
                        code: item.code.clone(),
                        reference_code: reference.code.clone(),
                    });
                }
            }

            if let Some(missing) = item
                .required_surcharge_ids
                .iter()
                .find(|id| !by_id.contains_key(id))
            {
                return Err(CatalogError::DanglingSurcharge {
                    code: item.code.clone(),
                    surcharge: *missing,
                });
            }
        }

        Ok(Self { items, by_id })
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &CatalogItemId) -> Option<&CatalogItem> {
        self.by_id.get(id).map(|&idx| &self.items[idx])
    }

    pub fn by_code(&self, code: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.code == code)
    }

    /// Active rows of one category/subcategory, in catalog order.
    pub fn selectable_in<'a>(
        &'a self,
        category: &'a str,
        subcategory: Option<&'a str>,
    ) -> impl Iterator<Item = &'a CatalogItem> + 'a {
        self.items.iter().filter(move |item| {
            item.is_selectable()
                && item.category.eq_ignore_ascii_case(category)
                && subcategory.is_none_or(|sub| item.subcategory.eq_ignore_ascii_case(sub))
        })
    }

    pub fn into_items(self) -> Vec<CatalogItem> {
        self.items
    }
}

impl CatalogLookup for Catalog {
    fn find(&self, id: &CatalogItemId) -> Option<&CatalogItem> {
        self.get(id)
    }
}

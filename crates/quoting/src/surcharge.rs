use std::collections::HashSet;

use poolquote_catalog::{Catalog, CatalogItem};
use poolquote_core::CatalogItemId;

use crate::error::ResolveError;

/// Every surcharge `root` requires, directly or transitively, in depth-first
/// order. Each surcharge appears once even if several paths lead to it; `root`
/// itself is not included.
///
/// A surcharge graph that leads back to an item already on the current path is
/// rejected with [`ResolveError::SurchargeCycle`]; nothing is truncated. A
/// required surcharge that is no longer active is
/// [`ResolveError::InactiveSurcharge`].
pub fn expand_surcharges<'a>(
    root: &'a CatalogItem,
    catalog: &'a Catalog,
) -> Result<Vec<&'a CatalogItem>, ResolveError> {
    let mut expansion = Expansion {
        catalog,
        path: vec![root],
        visited: HashSet::from([root.id]),
        out: Vec::new(),
    };
    expansion.visit(root)?;
    Ok(expansion.out)
}

struct Expansion<'a> {
    catalog: &'a Catalog,
    path: Vec<&'a CatalogItem>,
    visited: HashSet<CatalogItemId>,
    out: Vec<&'a CatalogItem>,
}

impl<'a> Expansion<'a> {
    fn visit(&mut self, item: &'a CatalogItem) -> Result<(), ResolveError> {
        for id in &item.required_surcharge_ids {
            let surcharge = self
                .catalog
                .get(id)
                .ok_or_else(|| ResolveError::UnknownSurcharge {
                    code: item.code.clone(),
                    surcharge: *id,
                })?;

            if !surcharge.is_selectable() {
                return Err(ResolveError::InactiveSurcharge {
                    code: item.code.clone(),
                    surcharge: surcharge.code.clone(),
                });
            }
            if self.path.iter().any(|on_path| on_path.id == surcharge.id) {
                let mut path: Vec<String> = self.path.iter().map(|i| i.code.clone()).collect();
                path.push(surcharge.code.clone());
                return Err(ResolveError::SurchargeCycle { path });
            }
            if !self.visited.insert(surcharge.id) {
                continue;
            }

            self.out.push(surcharge);
            self.path.push(surcharge);
            self.visit(surcharge)?;
            self.path.pop();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poolquote_catalog::Pricing;
    use rust_decimal::Decimal;

    fn id(code: &str) -> CatalogItemId {
        CatalogItemId::from_code(code)
    }

    fn row(code: &str, surcharges: &[&str]) -> CatalogItem {
        surcharges.iter().fold(
            CatalogItem::new(id(code), code, code, "technologie", "filtrace", Pricing::fixed(Decimal::from(500))),
            |item, s| item.with_surcharge(id(s)),
        )
    }

    fn codes(items: &[&CatalogItem]) -> Vec<String> {
        items.iter().map(|i| i.code.clone()).collect()
    }

    #[test]
    fn item_without_surcharges_expands_to_nothing() {
        let catalog = Catalog::new(vec![row("FILT-PIS-400", &[])]).unwrap();
        let root = catalog.by_code("FILT-PIS-400").unwrap();
        assert!(expand_surcharges(root, &catalog).unwrap().is_empty());
    }

    #[test]
    fn transitive_surcharges_are_included() {
        let catalog = Catalog::new(vec![
            row("FILT-PIS-400", &["SLUZ-MONT"]),
            row("SLUZ-MONT", &["SLUZ-DOP"]),
            row("SLUZ-DOP", &[]),
        ])
        .unwrap();
        let root = catalog.by_code("FILT-PIS-400").unwrap();
        assert_eq!(codes(&expand_surcharges(root, &catalog).unwrap()), vec!["SLUZ-MONT", "SLUZ-DOP"]);
    }

    #[test]
    fn diamond_yields_shared_surcharge_once() {
        let catalog = Catalog::new(vec![
            row("TC-12-HAYW", &["OHR-EL-3", "SLUZ-MONT"]),
            row("OHR-EL-3", &["SLUZ-DOP"]),
            row("SLUZ-MONT", &["SLUZ-DOP"]),
            row("SLUZ-DOP", &[]),
        ])
        .unwrap();
        let root = catalog.by_code("TC-12-HAYW").unwrap();
        let expanded = expand_surcharges(root, &catalog).unwrap();
        assert_eq!(expanded.len(), 3);
        assert_eq!(codes(&expanded).iter().filter(|c| *c == "SLUZ-DOP").count(), 1);
    }

    #[test]
    fn inactive_surcharge_is_rejected() {
        let catalog = Catalog::new(vec![
            row("FILT-PIS-400", &["SLUZ-MONT"]),
            row("SLUZ-MONT", &[]).inactive(),
        ])
        .unwrap();
        let root = catalog.by_code("FILT-PIS-400").unwrap();
        assert_eq!(
            expand_surcharges(root, &catalog),
            Err(ResolveError::InactiveSurcharge {
                code: "FILT-PIS-400".into(),
                surcharge: "SLUZ-MONT".into(),
            })
        );
    }

    #[test]
    fn cycle_back_to_root_is_rejected() {
        let catalog = Catalog::new(vec![
            row("FILT-PIS-400", &["SLUZ-MONT"]),
            row("SLUZ-MONT", &["FILT-PIS-400"]),
        ])
        .unwrap();
        let root = catalog.by_code("FILT-PIS-400").unwrap();
        assert_eq!(
            expand_surcharges(root, &catalog),
            Err(ResolveError::SurchargeCycle {
                path: vec!["FILT-PIS-400".into(), "SLUZ-MONT".into(), "FILT-PIS-400".into()],
            })
        );
    }

    #[test]
    fn cycle_below_the_root_is_rejected() {
        let catalog = Catalog::new(vec![
            row("TC-12-HAYW", &["SLUZ-MONT"]),
            row("SLUZ-MONT", &["SLUZ-DOP"]),
            row("SLUZ-DOP", &["SLUZ-MONT"]),
        ])
        .unwrap();
        let root = catalog.by_code("TC-12-HAYW").unwrap();
        match expand_surcharges(root, &catalog) {
            Err(ResolveError::SurchargeCycle { path }) => {
                assert_eq!(path, vec!["TC-12-HAYW", "SLUZ-MONT", "SLUZ-DOP", "SLUZ-MONT"]);
            }
            other => panic!("expected a cycle, got {other:?}"),
        }
    }
}

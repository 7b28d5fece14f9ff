use crate::item::GeneratedQuoteItem;

/// What a single merge did to the target list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// No existing line matched; the candidate was appended.
    Appended,
    /// An existing line at this index gained new context labels.
    Extended(usize),
    /// An existing line already carried every label.
    Unchanged(usize),
}

/// Merge `candidate` into `items`.
///
/// A matching line keeps its quantity and prices (user edits survive); only
/// its `variants` grow. Merging the same candidate twice is a no-op.
pub fn merge_item(items: &mut Vec<GeneratedQuoteItem>, candidate: GeneratedQuoteItem) -> MergeOutcome {
    match items.iter().position(|existing| existing.matches(&candidate)) {
        Some(idx) => {
            let existing = &mut items[idx];
            let before = existing.variants.len();
            existing.variants.extend(candidate.variants);
            if existing.variants.len() == before {
                MergeOutcome::Unchanged(idx)
            } else {
                MergeOutcome::Extended(idx)
            }
        }
        None => {
            items.push(candidate);
            MergeOutcome::Appended
        }
    }
}

/// Merge every candidate in order; returns how many were appended.
pub fn merge_items<I>(items: &mut Vec<GeneratedQuoteItem>, candidates: I) -> usize
where
    I: IntoIterator<Item = GeneratedQuoteItem>,
{
    let mut appended = 0;
    for candidate in candidates {
        if merge_item(items, candidate) == MergeOutcome::Appended {
            appended += 1;
        }
    }
    appended
}

#[cfg(test)]
mod tests {
    use super::*;
    use poolquote_catalog::Unit;
    use poolquote_core::CatalogItemId;
    use rust_decimal::Decimal;

    fn line(code: &str, label: &str) -> GeneratedQuoteItem {
        let mut item = GeneratedQuoteItem::freehand(code, "technologie", Decimal::ONE, Unit::Piece, Decimal::from(100), 2);
        item.product_id = Some(CatalogItemId::from_code(code));
        item.code = Some(code.to_string());
        item.variants.insert(label.to_string());
        item
    }

    #[test]
    fn new_line_is_appended() {
        let mut items = vec![line("FILT-PIS-400", "q1:technology")];
        assert_eq!(merge_item(&mut items, line("SVET-LED-30", "q1:lighting")), MergeOutcome::Appended);
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn existing_line_keeps_user_edits_and_gains_context() {
        let mut edited = line("FILT-PIS-400", "q1:technology");
        edited.quantity = Decimal::from(2);
        edited.unit_price = Decimal::from(90);
        let mut items = vec![edited.clone()];

        let outcome = merge_item(&mut items, line("FILT-PIS-400", "q2:technology"));
        assert_eq!(outcome, MergeOutcome::Extended(0));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, Decimal::from(2));
        assert_eq!(items[0].unit_price, Decimal::from(90));
        assert!(items[0].variants.contains("q2:technology"));
    }

    #[test]
    fn repeated_merge_is_a_no_op() {
        let mut items = Vec::new();
        merge_item(&mut items, line("SVET-LED-30", "q1:lighting"));
        let snapshot = items.clone();
        assert_eq!(merge_item(&mut items, line("SVET-LED-30", "q1:lighting")), MergeOutcome::Unchanged(0));
        assert_eq!(items, snapshot);
    }

    #[test]
    fn freehand_line_matches_by_name() {
        let manual = GeneratedQuoteItem::freehand("Svetlo LED", "technologie", Decimal::ONE, Unit::Piece, Decimal::from(80), 2);
        let mut items = vec![manual];
        let mut generated = line("SVET-LED-30", "q1:lighting");
        generated.name = "SVETLO led".into();
        assert_eq!(merge_items(&mut items, [generated]), 0);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].unit_price, Decimal::from(80));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn candidates() -> impl Strategy<Value = Vec<GeneratedQuoteItem>> {
            prop::collection::vec(
                (
                    prop::sample::select(vec!["FILT-PIS-400", "SVET-LED-30", "TC-12-HAYW", "SCHOD-ROM-1500"]),
                    prop::sample::select(vec!["q1:stairs", "q1:technology", "q2:lighting"]),
                ),
                0..20,
            )
            .prop_map(|pairs| pairs.into_iter().map(|(code, label)| line(code, label)).collect())
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 128,
                ..ProptestConfig::default()
            })]

            /// Property: merging the same candidates a second time changes nothing.
            #[test]
            fn merge_is_idempotent(existing in candidates(), incoming in candidates()) {
                let mut once = Vec::new();
                merge_items(&mut once, existing);
                merge_items(&mut once, incoming.clone());
                let mut twice = once.clone();
                prop_assert_eq!(merge_items(&mut twice, incoming), 0);
                prop_assert_eq!(once, twice);
            }
        }
    }
}

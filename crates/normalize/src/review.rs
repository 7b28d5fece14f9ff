//! Boilerplate detection and review flags.

use std::fmt;

use rust_decimal::Decimal;

use poolquote_codegen::RawCatalogRecord;
use poolquote_codegen::text::fold;

/// Folded leading words of price-list lines that are not products.
const BOILERPLATE: &[&str] = &[
    "cenik",
    "strana",
    "celkem",
    "cena bez dph",
    "dph",
    "poznamka",
    "platnost",
];

const FORMULA_ERRORS: &[&str] = &["#ref!", "#n/a", "#value!", "#div/0!", "#name?"];

const PLACEHOLDERS: &[&str] = &["???", "...", "---", "xxx"];

const MIN_NAME_CHARS: usize = 3;

/// `true` for headings, page footers and totals copied along with the price list.
pub fn is_boilerplate(name: &str) -> bool {
    let name = name.trim();
    if name.is_empty() || !name.chars().any(char::is_alphanumeric) {
        return true;
    }

    let folded = fold(name);
    BOILERPLATE.iter().any(|word| {
        folded
            .strip_prefix(word)
            .is_some_and(|rest| rest.chars().next().is_none_or(|c| !c.is_alphanumeric()))
    })
}

/// Why a normalized row needs a human look.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewReason {
    MissingPrice,
    NegativePrice,
    UnrecognizedCategory(String),
    FormulaError,
    PlaceholderPunctuation,
    NameTooShort,
}

impl fmt::Display for ReviewReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewReason::MissingPrice => f.write_str("Chybí cena"),
            ReviewReason::NegativePrice => f.write_str("Záporná cena"),
            ReviewReason::UnrecognizedCategory(category) => {
                write!(f, "Nerozpoznaná kategorie: {category}")
            }
            ReviewReason::FormulaError => f.write_str("Chyba vzorce v textu"),
            ReviewReason::PlaceholderPunctuation => f.write_str("Zástupná interpunkce v názvu"),
            ReviewReason::NameTooShort => f.write_str("Příliš krátký název"),
        }
    }
}

/// All review reasons for `record`, in a fixed order.
pub fn review(record: &RawCatalogRecord, category_recognized: bool) -> Vec<ReviewReason> {
    let mut reasons = Vec::new();

    match record.price {
        None => reasons.push(ReviewReason::MissingPrice),
        Some(price) if price < Decimal::ZERO => reasons.push(ReviewReason::NegativePrice),
        Some(_) => {}
    }

    if !category_recognized {
        let category = match record.category() {
            "" => "(prázdná)",
            other => other,
        };
        reasons.push(ReviewReason::UnrecognizedCategory(category.to_string()));
    }

    let name = record.name.trim();
    let texts = [Some(name), record.description.as_deref()];
    if texts.iter().flatten().any(|text| has_formula_error(text)) {
        reasons.push(ReviewReason::FormulaError);
    }

    let lower = name.to_lowercase();
    if PLACEHOLDERS.iter().any(|p| lower.contains(p)) {
        reasons.push(ReviewReason::PlaceholderPunctuation);
    }

    if name.chars().count() < MIN_NAME_CHARS {
        reasons.push(ReviewReason::NameTooShort);
    }

    reasons
}

fn has_formula_error(text: &str) -> bool {
    let lower = text.to_lowercase();
    FORMULA_ERRORS.iter().any(|marker| lower.contains(marker))
}

/// Reasons as written to the `review_reason` column.
pub fn join_reasons(reasons: &[ReviewReason]) -> String {
    reasons
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, price: Option<i64>) -> RawCatalogRecord {
        RawCatalogRecord {
            name: name.to_string(),
            price: price.map(Decimal::from),
            category: Some("chemie".to_string()),
            ..RawCatalogRecord::default()
        }
    }

    #[test]
    fn boilerplate_lines_are_recognized() {
        for line in ["", "   ", "-----", "Ceník 2024", "STRANA 3", "Celkem:", "Cena bez DPH", "Poznámka: platí do vyprodání"] {
            assert!(is_boilerplate(line), "{line:?} should be boilerplate");
        }
    }

    #[test]
    fn products_starting_like_boilerplate_are_kept() {
        assert!(!is_boilerplate("Stranový skimmer"));
        assert!(!is_boilerplate("Chlor tablety 5 kg"));
        assert!(!is_boilerplate("DPHx adaptér"));
    }

    #[test]
    fn clean_record_has_no_reasons() {
        assert!(review(&record("Chlor tablety 5 kg", Some(890)), true).is_empty());
    }

    #[test]
    fn every_problem_is_reported_in_order() {
        let mut r = record("#N/A", None);
        r.category = Some("Zahrada".into());
        let reasons = review(&r, false);
        assert_eq!(
            join_reasons(&reasons),
            "Chybí cena; Nerozpoznaná kategorie: Zahrada; Chyba vzorce v textu"
        );
    }

    #[test]
    fn placeholders_and_short_names() {
        assert_eq!(
            review(&record("Filtr ???", Some(1)), true),
            vec![ReviewReason::PlaceholderPunctuation]
        );
        assert_eq!(review(&record("Xy", Some(1)), true), vec![ReviewReason::NameTooShort]);
    }

    #[test]
    fn formula_error_in_description_is_flagged() {
        let mut r = record("Čerpadlo 0,5 kW", Some(4500));
        r.description = Some("výkon =#REF!".into());
        assert_eq!(review(&r, true), vec![ReviewReason::FormulaError]);
    }

    #[test]
    fn negative_price_is_flagged() {
        assert_eq!(review(&record("Sleva akce", Some(-100)), true), vec![ReviewReason::NegativePrice]);
    }
}

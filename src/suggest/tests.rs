#![allow(clippy::unwrap_used)]

use super::*;

fn categories() -> Vec<String> {
    ["Groceries", "Rent", "Utilities", "Transport", "Entertainment", "Other"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[test]
fn resolve_accepts_exact_category() {
    assert_eq!(resolve_suggestion("Groceries", &categories()), "Groceries");
}

#[test]
fn resolve_trims_whitespace() {
    assert_eq!(resolve_suggestion("  Rent \n", &categories()), "Rent");
}

#[test]
fn resolve_falls_back_on_unknown_category() {
    assert_eq!(resolve_suggestion("Vacation", &categories()), "Other");
}

#[test]
fn resolve_falls_back_on_empty_reply() {
    assert_eq!(resolve_suggestion("", &categories()), "Other");
}

#[test]
fn resolve_is_case_sensitive() {
    assert_eq!(resolve_suggestion("groceries", &categories()), "Other");
}

#[test]
fn prompt_lists_categories_and_description() {
    let prompt = build_prompt("Supermarket Run", &categories());
    assert!(prompt.contains("\"Supermarket Run\""));
    assert!(prompt.contains("Groceries, Rent, Utilities, Transport, Entertainment, Other"));
    assert!(prompt.contains("Respond with only the category name."));
}

#[test]
fn scrub_masks_long_digit_runs() {
    assert_eq!(scrub("TRANSFER 1234567890 SAVINGS"), "TRANSFER 00000 SAVINGS");
}

#[test]
fn scrub_masks_date_fragments() {
    assert_eq!(scrub("CARD PAYMENT 14/07"), "CARD PAYMENT 01/01");
}

#[test]
fn scrub_leaves_short_numbers_alone() {
    assert_eq!(scrub("Bus 42 fare"), "Bus 42 fare");
}

#[test]
fn short_description_is_rejected_before_any_request() {
    let suggester = Suggester {
        api_key: "test-key".to_string(),
        model: DEFAULT_MODEL.to_string(),
    };
    let err = suggester.suggest("ab", &categories()).unwrap_err();
    assert_eq!(
        err.downcast_ref::<SuggestError>(),
        Some(&SuggestError::DescriptionTooShort)
    );
}

#[test]
fn minimum_length_counts_characters_not_bytes() {
    let suggester = Suggester {
        api_key: "test-key".to_string(),
        model: DEFAULT_MODEL.to_string(),
    };
    // two characters, six bytes
    let err = suggester.suggest("日本", &categories()).unwrap_err();
    assert_eq!(
        err.downcast_ref::<SuggestError>(),
        Some(&SuggestError::DescriptionTooShort)
    );
}

#[test]
fn whitespace_padding_does_not_satisfy_minimum_length() {
    let suggester = Suggester {
        api_key: "test-key".to_string(),
        model: DEFAULT_MODEL.to_string(),
    };
    let err = suggester.suggest("  a  ", &categories()).unwrap_err();
    assert_eq!(
        err.downcast_ref::<SuggestError>(),
        Some(&SuggestError::DescriptionTooShort)
    );
}

//! Property tests for the normalization layer.

use proptest::prelude::*;
use regex::Regex;

use skr::text::{normalize_identifier, normalize_phrase, tokenize};

proptest! {
    #[test]
    fn identifier_matches_registry_pattern_or_is_empty(text in ".*") {
        let pattern = Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap();
        let identifier = normalize_identifier(&text);
        prop_assert!(identifier.is_empty() || pattern.is_match(&identifier), "{identifier:?}");
    }

    #[test]
    fn normalize_phrase_is_idempotent(text in ".*") {
        let once = normalize_phrase(&text);
        prop_assert_eq!(normalize_phrase(&once), once.clone());
    }

    #[test]
    fn tokenize_is_deterministic(text in ".*") {
        prop_assert_eq!(tokenize(&text), tokenize(&text));
    }

    #[test]
    fn ascii_tokens_are_at_least_two_chars(text in ".*") {
        for token in tokenize(&text) {
            if token.is_ascii() {
                prop_assert!(token.chars().count() >= 2, "{token:?}");
            }
        }
    }
}

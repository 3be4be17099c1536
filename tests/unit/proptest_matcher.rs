//! Property-based tests for matchers and mode normalization
//!
//! Uses proptest to verify properties that should hold for all inputs.

use proptest::prelude::*;
use unitspec::core::models::{Matcher, Pattern, Value, mode_from_integer, parse_mode};

proptest! {
    /// Every permission value survives formatting as octal text
    #[test]
    fn octal_text_parses_back(mode in 0u32..=0o7777) {
        prop_assert_eq!(parse_mode(&format!("{mode:o}")), Ok(mode));
        prop_assert_eq!(parse_mode(&format!("{mode:04o}")), Ok(mode));
        prop_assert_eq!(parse_mode(&format!("0o{mode:o}")), Ok(mode));
    }

    /// Integer and text forms of the same digits agree
    #[test]
    fn integer_and_text_modes_agree(mode in 0u32..=0o7777) {
        let digits = format!("{mode:o}");
        let integer: i64 = digits.parse().unwrap();
        prop_assert_eq!(mode_from_integer(integer), parse_mode(&digits));
    }

    /// A literal pattern matches any text that contains it
    #[test]
    fn substring_found_anywhere(
        prefix in "[a-zA-Z0-9 =\n]{0,20}",
        needle in "[a-zA-Z][a-zA-Z0-9=]{0,10}",
        suffix in "[a-zA-Z0-9 =\n]{0,20}"
    ) {
        let pattern = Pattern::parse(&needle).unwrap();
        let haystack = format!("{prefix}{needle}{suffix}");
        prop_assert!(pattern.is_match(&haystack));
    }

    /// `cmp` on text ignores ASCII case
    #[test]
    fn cmp_ignores_case(name in "[a-z][a-z0-9_-]{0,15}") {
        let matcher = Matcher::Cmp(Value::Text(name.to_uppercase()));
        prop_assert!(matcher.matches(&Value::Text(name)));
    }

    /// `eq` on modes is numeric equality
    #[test]
    fn eq_mode_is_numeric(expected in 0u32..=0o7777, actual in 0u32..=0o7777) {
        let matcher = Matcher::Eq(Value::Mode(expected));
        prop_assert_eq!(matcher.matches(&Value::Mode(actual)), expected == actual);
    }
}

//! Property-based tests for the extension filter.
//! Verifies invariants hold for ALL names, not just fixed examples.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, missing_docs)]

use platform::extension_matches;

proptest::proptest! {
    /// An empty filter or "*" accepts every name.
    #[test]
    fn wildcard_accepts_everything(name in ".{0,40}") {
        assert!(extension_matches(&name, ""));
        assert!(extension_matches(&name, "*"));
    }

    /// A listed extension matches whatever its case and position in the list.
    #[test]
    fn listed_extension_matches(
        stem in "[a-zA-Z0-9 _-]{1,20}",
        ext in "[a-z0-9]{1,5}",
        others in proptest::collection::vec("[a-z]{1,4}", 0..4),
        upper in proptest::bool::ANY,
    ) {
        let shown = if upper { ext.to_ascii_uppercase() } else { ext.clone() };
        let name = format!("{stem}.{shown}");
        let mut list = others;
        list.push(ext);
        assert!(extension_matches(&name, &list.join(",")), "{name} vs {list:?}");
    }

    /// A name without a dot is rejected by any concrete filter.
    #[test]
    fn name_without_extension_rejected(
        name in "[a-zA-Z0-9 _-]{0,20}",
        filter in "[a-z]{1,4}(,[a-z]{1,4}){0,3}",
    ) {
        assert!(!extension_matches(&name, &filter));
    }
}

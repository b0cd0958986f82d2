// tests/property/status_test.rs

//! Property-based tests for status line parsing.

use dictclient::core::protocol::Status;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    #[test]
    fn test_valid_codes_parse(code in 100u16..=599, details in "[ -~]{0,80}") {
        let status = Status::parse(&format!("{code} {details}")).unwrap();
        prop_assert_eq!(status.code, code);
        prop_assert_eq!(status.details, details);
    }

    #[test]
    fn test_out_of_range_codes_are_rejected(code in prop_oneof![0u16..100, 600u16..1000]) {
        let line = format!("{code:03} text");
        prop_assert!(Status::parse(&line).is_err());
    }

    #[test]
    fn test_non_numeric_prefix_is_rejected(prefix in "[a-zA-Z]{1,3}", details in "[ -~]{0,20}") {
        let line = format!("{prefix} {details}");
        prop_assert!(Status::parse(&line).is_err());
    }

    #[test]
    fn test_leading_count(count in 0usize..100_000) {
        let status = Status::parse(&format!("152 {count} matches found")).unwrap();
        prop_assert_eq!(status.leading_count().unwrap(), count);
    }
}

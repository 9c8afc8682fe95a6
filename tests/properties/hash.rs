//! Property tests for the content hash textual form.

use proptest::prelude::*;

use paver::ContentHash;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: any 16-hex-digit string parses, regardless of case.
    #[test]
    fn property_sixteen_hex_digits_parse(s in "[0-9a-fA-F]{16}") {
        prop_assert!(ContentHash::parse(&s).is_some());
    }

    /// PROPERTY: any other length is rejected.
    #[test]
    fn property_wrong_length_rejected(s in "[0-9a-f]{0,32}") {
        prop_assume!(s.len() != 16);
        prop_assert!(ContentHash::parse(&s).is_none());
    }

    /// PROPERTY: display round-trips through parse.
    #[test]
    fn property_display_round_trips(n in any::<u64>()) {
        let hash = ContentHash::parse(&format!("{n:016x}")).unwrap();
        prop_assert_eq!(ContentHash::parse(&hash.to_string()), Some(hash));
    }

    /// PROPERTY: `parse` never panics on arbitrary input.
    #[test]
    fn property_parse_never_panics(s in ".{0,64}") {
        let _ = ContentHash::parse(&s);
    }
}

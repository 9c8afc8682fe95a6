//! Property tests for file classification and extension swapping.

use proptest::prelude::*;

use paver::classify::{classify, convert_source_candidates, swap_extension, FileClass};

fn path_string() -> impl Strategy<Value = String> {
    let segment = proptest::string::string_regex("[A-Za-z0-9._-]{1,12}").unwrap();
    proptest::collection::vec(segment, 1..=4).prop_map(|segments| segments.join("/"))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: classification is total and case-insensitive.
    #[test]
    fn property_classification_case_insensitive(path in path_string()) {
        let upper = classify(&path.to_uppercase());
        let lower = classify(&path.to_lowercase());
        prop_assert_eq!(upper, lower);
    }

    /// PROPERTY: `classify` never panics on arbitrary strings.
    #[test]
    fn property_classify_never_panics(s in ".{0,128}") {
        let _ = classify(&s);
    }

    /// PROPERTY: swapping to a convert extension always yields a Convert path.
    #[test]
    fn property_swapped_convert_extension_classifies_convert(path in path_string()) {
        let png = swap_extension(&path, "png");
        prop_assert_eq!(classify(&png), FileClass::Convert);
    }

    /// PROPERTY: every texture output names its sources via candidate swaps.
    #[test]
    fn property_candidates_reverse_the_texture_swap(path in path_string()) {
        let texture = swap_extension(&path, "paa");
        let candidates = convert_source_candidates(&texture);
        prop_assert!(candidates.contains(&swap_extension(&path, "png")));
        prop_assert!(candidates.contains(&swap_extension(&path, "jpg")));
    }
}

//! Property tests for manifest parsing/serialization.

use proptest::prelude::*;

use paver::{ContentHash, Manifest, ManifestEntry};

fn relative_path_string() -> impl Strategy<Value = String> {
    // Forward-slash relative paths, no tabs or newlines (the record
    // separators), no empty segments.
    let segment = proptest::string::string_regex("[A-Za-z0-9._-]{1,12}").unwrap();
    proptest::collection::vec(segment, 1..=4).prop_map(|segments| segments.join("/"))
}

fn content_hash() -> impl Strategy<Value = ContentHash> {
    any::<u64>().prop_map(|n| ContentHash::parse(&format!("{n:016x}")).unwrap())
}

fn manifest_entry() -> impl Strategy<Value = ManifestEntry> {
    prop_oneof![
        content_hash().prop_map(|hash| ManifestEntry::Verbatim { hash }),
        (content_hash(), relative_path_string(), content_hash()).prop_map(
            |(source_hash, output_path, output_hash)| ManifestEntry::Transformed {
                source_hash,
                output_path,
                output_hash,
            }
        ),
    ]
}

fn manifest() -> impl Strategy<Value = Manifest> {
    proptest::collection::btree_map(relative_path_string(), manifest_entry(), 0..16).prop_map(
        |entries| {
            let mut manifest = Manifest::new();
            for (path, entry) in entries {
                manifest.insert(path, entry);
            }
            manifest
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: `parse(serialize(m)) == m` for every manifest.
    #[test]
    fn property_manifest_round_trips(m in manifest()) {
        let text = m.serialize();
        let parsed = Manifest::parse(&text).unwrap();
        prop_assert_eq!(parsed, m);
    }

    /// PROPERTY: serialization is deterministic and sorted by path.
    #[test]
    fn property_serialization_is_deterministic(m in manifest()) {
        let first = m.serialize();
        let second = m.serialize();
        prop_assert_eq!(&first, &second);

        let paths: Vec<&str> = first
            .lines()
            .map(|line| line.split('\t').next().unwrap())
            .collect();
        let mut sorted = paths.clone();
        sorted.sort();
        prop_assert_eq!(paths, sorted);
    }

    /// PROPERTY: `parse` never panics on arbitrary input.
    #[test]
    fn property_parse_never_panics(text in ".{0,512}") {
        let _ = Manifest::parse(&text);
    }

    /// PROPERTY: lines with a field count other than 2 or 4 are rejected.
    #[test]
    fn property_wrong_field_count_rejected(
        path in relative_path_string(),
        hash in content_hash(),
        extra in "[a-z]{1,8}",
        use_three in any::<bool>(),
    ) {
        let line = if use_three {
            format!("{path}\t{hash}\t{extra}\n")
        } else {
            format!("{path}\t{hash}\t{path}\t{hash}\t{extra}\n")
        };
        prop_assert!(Manifest::parse(&line).is_err());
    }
}

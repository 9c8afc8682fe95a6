//! Build manifest: persisted source/output hash tracking
//!
//! The manifest is a plain-text file with one tab-separated record per line,
//! stored at a reserved name inside the output root. Two shapes exist on
//! disk:
//!
//! ```text
//! <path>\t<hash16>                                      compact/legacy form
//! <sourcePath>\t<sourceHash16>\t<outputPath>\t<outputHash16>   extended form
//! ```
//!
//! The compact form means "output path and hash equal source path and hash"
//! (a verbatim copy). Internally that distinction is a tagged variant rather
//! than four sometimes-redundant fields, and entries collapse back to the
//! compact form at serialization time.
//!
//! Entries are kept in a `BTreeMap` so serialization is sorted by path and
//! manifests stay diff-friendly across runs with identical content.

use std::collections::BTreeMap;

use crate::error::{PaverError, PaverResult};
use crate::hash::ContentHash;

/// Reserved manifest file name inside the output root
pub const MANIFEST_FILE_NAME: &str = ".build.manifest";

/// One tracked source file, keyed externally by its source-relative path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestEntry {
    /// Copied verbatim: output path and hash equal the source's
    Verbatim { hash: ContentHash },
    /// Converted: output identity diverges from the source's
    Transformed {
        source_hash: ContentHash,
        output_path: String,
        output_hash: ContentHash,
    },
}

impl ManifestEntry {
    /// Hash of the source file
    pub fn source_hash(&self) -> ContentHash {
        match self {
            Self::Verbatim { hash } => *hash,
            Self::Transformed { source_hash, .. } => *source_hash,
        }
    }

    /// Relative path of the produced artifact
    pub fn output_path<'a>(&'a self, source_path: &'a str) -> &'a str {
        match self {
            Self::Verbatim { .. } => source_path,
            Self::Transformed { output_path, .. } => output_path,
        }
    }

    /// Hash of the produced artifact
    pub fn output_hash(&self) -> ContentHash {
        match self {
            Self::Verbatim { hash } => *hash,
            Self::Transformed { output_hash, .. } => *output_hash,
        }
    }

    /// Collapse a `Transformed` whose output identity equals its source
    /// identity into `Verbatim`, so compact records round-trip structurally.
    fn normalized(self, source_path: &str) -> Self {
        match self {
            Self::Transformed {
                source_hash,
                output_path,
                output_hash,
            } if output_path == source_path && output_hash == source_hash => {
                Self::Verbatim { hash: source_hash }
            }
            other => other,
        }
    }
}

/// Persisted mapping from source-relative path to hash-tracking metadata
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: BTreeMap<String, ManifestEntry>,
}

impl Manifest {
    /// Create an empty manifest
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse manifest text.
    ///
    /// Empty lines are skipped; empty text is an empty manifest. A line with
    /// a field count other than 2 or 4, or a hash field that is not 16 hex
    /// digits, is a hard error carrying the offending line's literal text.
    pub fn parse(text: &str) -> PaverResult<Self> {
        let mut manifest = Self::new();
        for line in text.lines() {
            if line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            let parse_hash = |s: &str| {
                ContentHash::parse(s).ok_or_else(|| PaverError::ManifestHash {
                    line: line.to_string(),
                })
            };
            match fields.as_slice() {
                [path, hash] => {
                    let hash = parse_hash(hash)?;
                    manifest.insert(*path, ManifestEntry::Verbatim { hash });
                }
                [source_path, source_hash, output_path, output_hash] => {
                    let source_hash = parse_hash(source_hash)?;
                    let output_hash = parse_hash(output_hash)?;
                    manifest.insert(
                        *source_path,
                        ManifestEntry::Transformed {
                            source_hash,
                            output_path: output_path.to_string(),
                            output_hash,
                        },
                    );
                }
                _ => {
                    return Err(PaverError::ManifestLine {
                        line: line.to_string(),
                    })
                }
            }
        }
        Ok(manifest)
    }

    /// Serialize to manifest text, sorted by source path.
    ///
    /// Verbatim entries emit the compact 2-field form; transformed entries
    /// emit the extended 4-field form.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for (path, entry) in &self.entries {
            match entry {
                ManifestEntry::Verbatim { hash } => {
                    out.push_str(&format!("{path}\t{hash}\n"));
                }
                ManifestEntry::Transformed {
                    source_hash,
                    output_path,
                    output_hash,
                } => {
                    out.push_str(&format!(
                        "{path}\t{source_hash}\t{output_path}\t{output_hash}\n"
                    ));
                }
            }
        }
        out
    }

    /// Insert an entry, normalizing degenerate transformed entries
    pub fn insert(&mut self, path: impl Into<String>, entry: ManifestEntry) {
        let path = path.into();
        let entry = entry.normalized(&path);
        self.entries.insert(path, entry);
    }

    /// Look up the entry for a source-relative path
    pub fn get(&self, path: &str) -> Option<&ManifestEntry> {
        self.entries.get(path)
    }

    /// Whether a source-relative path is tracked
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Number of tracked paths
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the manifest tracks nothing
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in path order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &ManifestEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash(s: &str) -> ContentHash {
        ContentHash::parse(s).unwrap()
    }

    #[test]
    fn parse_empty_text_is_empty_manifest() {
        let manifest = Manifest::parse("").unwrap();
        assert!(manifest.is_empty());
    }

    #[test]
    fn parse_compact_form() {
        let manifest = Manifest::parse("config.cpp\tabcdef0123456789\n").unwrap();
        assert_eq!(manifest.len(), 1);
        let entry = manifest.get("config.cpp").unwrap();
        assert_eq!(entry.source_hash(), hash("abcdef0123456789"));
        assert_eq!(entry.output_path("config.cpp"), "config.cpp");
        assert_eq!(entry.output_hash(), hash("abcdef0123456789"));
    }

    #[test]
    fn parse_extended_form() {
        let manifest = Manifest::parse(
            "texture.png\tabcdef0123456789\ttexture.paa\t1111222233334444\n",
        )
        .unwrap();
        let entry = manifest.get("texture.png").unwrap();
        assert_eq!(entry.source_hash(), hash("abcdef0123456789"));
        assert_eq!(entry.output_path("texture.png"), "texture.paa");
        assert_eq!(entry.output_hash(), hash("1111222233334444"));
    }

    #[test]
    fn parse_rejects_bad_field_count() {
        // 1, 3 and 5 fields are all malformed
        for text in [
            "lonely\n",
            "a\tb\tc\n",
            "a.txt\t1111111111111111\tb.paa\t2222222222222222\textra\n",
        ] {
            let err = Manifest::parse(text).unwrap_err();
            assert!(
                matches!(err, PaverError::ManifestLine { ref line } if text.starts_with(line.as_str())),
                "{text:?} gave {err}"
            );
        }
    }

    #[test]
    fn parse_rejects_invalid_hash() {
        let err = Manifest::parse("foo.txt\tZZZZZZZZZZZZZZZZ\n").unwrap_err();
        match err {
            PaverError::ManifestHash { line } => {
                assert_eq!(line, "foo.txt\tZZZZZZZZZZZZZZZZ")
            }
            other => panic!("expected ManifestHash, got {other}"),
        }
    }

    #[test]
    fn parse_rejects_short_and_long_hashes() {
        assert!(Manifest::parse("a.txt\tabc\n").is_err());
        assert!(Manifest::parse("a.txt\tabcdef0123456789ff\n").is_err());
    }

    #[test]
    fn parse_validates_both_hashes_of_extended_form() {
        let err =
            Manifest::parse("a.png\t1111111111111111\ta.paa\tnothex\n").unwrap_err();
        assert!(matches!(err, PaverError::ManifestHash { .. }));
    }

    #[test]
    fn parse_accepts_uppercase_hashes() {
        let manifest = Manifest::parse("a.txt\tABCDEF0123456789\n").unwrap();
        assert_eq!(
            manifest.get("a.txt").unwrap().source_hash(),
            hash("abcdef0123456789")
        );
    }

    #[test]
    fn parse_skips_blank_lines() {
        let manifest =
            Manifest::parse("\na.txt\t1111111111111111\n\nb.txt\t2222222222222222\n\n")
                .unwrap();
        assert_eq!(manifest.len(), 2);
    }

    #[test]
    fn serialize_is_sorted_by_path() {
        let mut manifest = Manifest::new();
        manifest.insert("z.txt", ManifestEntry::Verbatim { hash: hash("1111111111111111") });
        manifest.insert("a.txt", ManifestEntry::Verbatim { hash: hash("2222222222222222") });
        let text = manifest.serialize();
        assert_eq!(text, "a.txt\t2222222222222222\nz.txt\t1111111111111111\n");
    }

    #[test]
    fn serialize_uses_compact_form_for_verbatim() {
        let mut manifest = Manifest::new();
        manifest.insert("a.txt", ManifestEntry::Verbatim { hash: hash("1111111111111111") });
        assert_eq!(manifest.serialize(), "a.txt\t1111111111111111\n");
    }

    #[test]
    fn serialize_uses_extended_form_for_transformed() {
        let mut manifest = Manifest::new();
        manifest.insert(
            "t.png",
            ManifestEntry::Transformed {
                source_hash: hash("1111111111111111"),
                output_path: "t.paa".to_string(),
                output_hash: hash("2222222222222222"),
            },
        );
        assert_eq!(
            manifest.serialize(),
            "t.png\t1111111111111111\tt.paa\t2222222222222222\n"
        );
    }

    #[test]
    fn degenerate_transformed_collapses_to_verbatim() {
        let mut manifest = Manifest::new();
        manifest.insert(
            "a.txt",
            ManifestEntry::Transformed {
                source_hash: hash("1111111111111111"),
                output_path: "a.txt".to_string(),
                output_hash: hash("1111111111111111"),
            },
        );
        assert_eq!(
            manifest.get("a.txt"),
            Some(&ManifestEntry::Verbatim { hash: hash("1111111111111111") })
        );
        assert_eq!(manifest.serialize(), "a.txt\t1111111111111111\n");
    }

    #[test]
    fn round_trip_preserves_entries() {
        let mut manifest = Manifest::new();
        manifest.insert("b/config.cpp", ManifestEntry::Verbatim { hash: hash("cbf29ce484222325") });
        manifest.insert(
            "a/texture.png",
            ManifestEntry::Transformed {
                source_hash: hash("abcdef0123456789"),
                output_path: "a/texture.paa".to_string(),
                output_hash: hash("1111222233334444"),
            },
        );
        let parsed = Manifest::parse(&manifest.serialize()).unwrap();
        assert_eq!(parsed, manifest);
    }

    #[test]
    fn duplicate_path_last_entry_wins() {
        let manifest = Manifest::parse(
            "a.txt\t1111111111111111\na.txt\t2222222222222222\n",
        )
        .unwrap();
        assert_eq!(manifest.len(), 1);
        assert_eq!(
            manifest.get("a.txt").unwrap().source_hash(),
            hash("2222222222222222")
        );
    }
}

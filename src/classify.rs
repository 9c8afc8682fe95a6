//! File classification tables
//!
//! Every file in the source tree falls into exactly one category based on
//! its extension (case-insensitive): copied verbatim, converted through the
//! external texture tool, or ignored.

/// Extensions copied verbatim into the output tree
pub const COPY_EXTENSIONS: &[&str] = &["cpp", "txt", "json", "rvmat", "p3d"];

/// Extensions converted via the external tool
pub const CONVERT_EXTENSIONS: &[&str] = &["png", "jpg"];

/// Target extension produced by the converter
pub const TEXTURE_EXTENSION: &str = "paa";

/// What the build does with a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileClass {
    /// Copy bytes verbatim, same relative path
    Copy,
    /// Run through the converter, extension swapped to `.paa`
    Convert,
    /// Not part of the build
    Ignore,
}

/// Classify a source-relative path by its extension.
///
/// Exhaustive and mutually exclusive: exactly one class per path.
pub fn classify(path: &str) -> FileClass {
    let ext = match extension(path) {
        Some(ext) => ext.to_ascii_lowercase(),
        None => return FileClass::Ignore,
    };
    if COPY_EXTENSIONS.contains(&ext.as_str()) {
        FileClass::Copy
    } else if CONVERT_EXTENSIONS.contains(&ext.as_str()) {
        FileClass::Convert
    } else {
        FileClass::Ignore
    }
}

/// Extension of the final path segment, without the dot.
///
/// A dotfile named like an extension (`.cpp`) has that extension; there is
/// no hidden-file exemption.
fn extension(path: &str) -> Option<&str> {
    let name = path.rsplit('/').next().unwrap_or(path);
    name.rfind('.').map(|idx| &name[idx + 1..])
}

/// Replace the extension of a relative path, or append one if it has none.
///
/// `new_ext` is given without the dot. Operates on forward-slash relative
/// paths as stored in the manifest.
pub fn swap_extension(path: &str, new_ext: &str) -> String {
    let stem_len = match extension(path) {
        Some(ext) => path.len() - ext.len() - 1,
        None => path.len(),
    };
    format!("{}.{}", &path[..stem_len], new_ext)
}

/// Candidate source paths that would convert to the given output path.
///
/// Used by stale-output detection: an output file is kept when any
/// convertible extension swapped into its name names a tracked source.
pub fn convert_source_candidates(output_path: &str) -> Vec<String> {
    CONVERT_EXTENSIONS
        .iter()
        .map(|ext| swap_extension(output_path, ext))
        .collect()
}

//! Error types for paver
//!
//! Uses `thiserror` for library errors. Everything here is fatal for the
//! current run except where the caller explicitly downgrades it (the final
//! manifest write is reported as a warning, not an error).

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for paver operations
pub type PaverResult<T> = Result<T, PaverError>;

/// Main error type for paver operations
#[derive(Error, Debug)]
pub enum PaverError {
    /// Source root does not exist
    #[error("source path does not exist: {path}")]
    SourceMissing { path: PathBuf },

    /// Source root exists but is a plain file
    #[error("source path {path} exists but is not a directory")]
    SourceNotADirectory { path: PathBuf },

    /// Output root exists but is a plain file
    #[error("output path {path} exists but is not a directory")]
    OutputNotADirectory { path: PathBuf },

    /// Manifest line with a field count other than 2 or 4
    #[error("invalid manifest line: {line}")]
    ManifestLine { line: String },

    /// Manifest hash field that is not 16 hex digits
    #[error("invalid hash in manifest line: {line}")]
    ManifestHash { line: String },

    /// Failed to list a directory during a tree walk
    #[error("error reading directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A file name in the tree is not valid UTF-8 and cannot become a
    /// manifest key
    #[error("file name is not valid UTF-8: {path}")]
    NonUtf8Name { path: PathBuf },

    /// Failed to create a directory in the output tree
    #[error("error creating directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to copy a source file into the output tree
    #[error("error copying {src} to {dst}: {source}")]
    CopyFile {
        src: PathBuf,
        dst: PathBuf,
        source: std::io::Error,
    },

    /// Failed to open or read an input file during the scan
    #[error("error reading input file {path}: {source}")]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to open or hash a produced output file
    #[error("error hashing output file {path}: {source}")]
    HashOutput {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The converter executable could not be launched
    #[error("could not launch converter {program}: {source}")]
    ConverterLaunch {
        program: PathBuf,
        source: std::io::Error,
    },

    /// The converter ran but exited nonzero; `output` is its combined
    /// stdout/stderr text
    #[error("converter failed for {path} ({status})\n{output}")]
    ConverterFailed {
        path: PathBuf,
        status: String,
        output: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Run was aborted by the user at a confirmation prompt
    #[error("build aborted by user")]
    Aborted,
}

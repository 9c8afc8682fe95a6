//! Paver - incremental build tool for mod content
//!
//! Paver scans a source tree, copies recognized asset/config files verbatim,
//! converts images to `.paa` textures through an external tool, and tracks
//! content hashes in a per-output-tree manifest so unchanged files are
//! skipped and stale outputs are cleaned up.

pub mod classify;
pub mod cli;
pub mod convert;
pub mod engine;
pub mod error;
pub mod hash;
pub mod manifest;
pub mod output;
pub mod prompt;
pub mod source;

// Re-exports for convenience
pub use classify::{classify, swap_extension, FileClass};
pub use convert::{CommandConverter, Converter, DEFAULT_CONVERTER};
pub use engine::{execute, plan, BuildEvent, BuildReport, Plan};
pub use error::{PaverError, PaverResult};
pub use hash::ContentHash;
pub use manifest::{Manifest, ManifestEntry, MANIFEST_FILE_NAME};
pub use output::OutputStore;
pub use prompt::confirm;
pub use source::{Source, Task};

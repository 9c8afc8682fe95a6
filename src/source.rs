//! Source tree scanner
//!
//! Walks the source tree once per run and produces a [`Task`]: the set of
//! source hashes plus the ordered copy/convert work lists. The walk is
//! recursive, lexical (entries sorted by name) and fail-fast: any unreadable
//! directory or file aborts the scan, since a partial task is not usable.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::classify::{classify, FileClass};
use crate::error::{PaverError, PaverResult};
use crate::hash::ContentHash;

/// Ephemeral result of scanning the source tree for one run.
///
/// Discarded after the run; the persisted manifest is derived from it once
/// all actions have completed.
#[derive(Debug, Clone, Default)]
pub struct Task {
    /// New source manifest: relative path to content hash
    pub hashes: BTreeMap<String, ContentHash>,
    /// Paths to copy verbatim, in walk order
    pub copy: Vec<String>,
    /// Paths to convert, in walk order
    pub convert: Vec<String>,
}

impl Task {
    /// Whether a source-relative path is part of this build
    pub fn tracks(&self, path: &str) -> bool {
        self.hashes.contains_key(path)
    }

    /// Content hash recorded for a source-relative path
    pub fn source_hash(&self, path: &str) -> Option<ContentHash> {
        self.hashes.get(path).copied()
    }

    /// Total number of files the build will consider
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    /// Whether the scan found nothing to build
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}

/// The source side of the build: owns the input tree
#[derive(Debug, Clone)]
pub struct Source {
    root: PathBuf,
}

impl Source {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Check the source root exists and is a directory.
    ///
    /// Runs before any action so structural problems surface immediately.
    pub fn ensure_valid(&self) -> PaverResult<()> {
        match std::fs::metadata(&self.root) {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(PaverError::SourceNotADirectory {
                path: self.root.clone(),
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(PaverError::SourceMissing {
                    path: self.root.clone(),
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Absolute (root-joined) path for a source-relative path
    pub fn real_path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    /// Walk the tree and build the run's [`Task`].
    ///
    /// Directories are traversed but not recorded. Ignored files contribute
    /// nothing. Each copy/convert file is streamed through a fresh hasher.
    pub fn scan(&self) -> PaverResult<Task> {
        let mut task = Task::default();
        self.walk(&self.root, "", &mut task)?;
        Ok(task)
    }

    fn walk(&self, dir: &Path, rel_prefix: &str, task: &mut Task) -> PaverResult<()> {
        let read_err = |source| PaverError::ReadDir {
            path: dir.to_path_buf(),
            source,
        };
        let mut entries: Vec<_> = std::fs::read_dir(dir)
            .map_err(read_err)?
            .collect::<Result<_, _>>()
            .map_err(read_err)?;
        // Lexical order keeps logs and action order reproducible
        entries.sort_by_key(|e| e.file_name());

        for entry in entries {
            let name = entry.file_name();
            // Manifest keys are UTF-8 strings; a name that cannot become one
            // would silently fail to resolve later
            let name = name.to_str().ok_or_else(|| PaverError::NonUtf8Name {
                path: entry.path(),
            })?;
            let rel = if rel_prefix.is_empty() {
                name.to_string()
            } else {
                format!("{rel_prefix}/{name}")
            };

            if entry.file_type()?.is_dir() {
                self.walk(&entry.path(), &rel, task)?;
                continue;
            }

            match classify(&rel) {
                FileClass::Copy => task.copy.push(rel.clone()),
                FileClass::Convert => task.convert.push(rel.clone()),
                FileClass::Ignore => continue,
            }

            let hash = ContentHash::from_file(&entry.path()).map_err(|source| {
                PaverError::ReadInput {
                    path: entry.path(),
                    source,
                }
            })?;
            task.hashes.insert(rel, hash);
        }
        Ok(())
    }
}

//! Output tree side effects
//!
//! The [`OutputStore`] owns the destination tree: it loads and persists the
//! build manifest (a reserved file excluded from cleanup), copies source
//! bytes in, drives conversions, hashes artifacts on demand, and detects
//! stale outputs left behind by earlier builds.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::classify::{convert_source_candidates, swap_extension, TEXTURE_EXTENSION};
use crate::convert::Converter;
use crate::error::{PaverError, PaverResult};
use crate::hash::ContentHash;
use crate::manifest::{Manifest, MANIFEST_FILE_NAME};
use crate::source::Task;

/// The destination side of the build: owns the output tree
#[derive(Debug, Clone)]
pub struct OutputStore {
    root: PathBuf,
}

impl OutputStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the output root if absent; fail if it exists as a plain file.
    pub fn ensure_exists(&self) -> PaverResult<()> {
        match std::fs::metadata(&self.root) {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(PaverError::OutputNotADirectory {
                path: self.root.clone(),
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                std::fs::create_dir_all(&self.root).map_err(|source| {
                    PaverError::CreateDir {
                        path: self.root.clone(),
                        source,
                    }
                })?;
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Location of the persisted manifest inside the output root
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE_NAME)
    }

    /// Absolute (root-joined) path for an output-relative path
    pub fn real_path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    /// Load the persisted manifest. A missing file is an empty manifest
    /// (first-ever build), not an error.
    pub fn load_manifest(&self) -> PaverResult<Manifest> {
        match std::fs::read_to_string(self.manifest_path()) {
            Ok(text) => Manifest::parse(&text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Manifest::new()),
            Err(err) => Err(err.into()),
        }
    }

    /// Persist the manifest atomically (tempfile in the root + rename), so a
    /// crash mid-write never leaves a truncated manifest behind.
    pub fn store_manifest(&self, manifest: &Manifest) -> PaverResult<()> {
        let mut tmp = tempfile::NamedTempFile::new_in(&self.root)?;
        tmp.write_all(manifest.serialize().as_bytes())?;
        tmp.persist(self.manifest_path())
            .map_err(|err| PaverError::Io(err.error))?;
        Ok(())
    }

    /// Copy bytes from an absolute source path to an output-relative path,
    /// creating intermediate directories as needed.
    pub fn copy_from(&self, src: &Path, rel: &str) -> PaverResult<()> {
        let dst = self.real_path(rel);
        create_parents(&dst)?;
        std::fs::copy(src, &dst).map_err(|source| PaverError::CopyFile {
            src: src.to_path_buf(),
            dst,
            source,
        })?;
        Ok(())
    }

    /// Convert an absolute source path into the output tree.
    ///
    /// The destination relative path is the source's with its extension
    /// swapped to `.paa`. Returns that path and the produced artifact's hash.
    pub fn convert_with(
        &self,
        converter: &dyn Converter,
        src: &Path,
        rel: &str,
    ) -> PaverResult<(String, ContentHash)> {
        let out_rel = swap_extension(rel, TEXTURE_EXTENSION);
        let dst = self.real_path(&out_rel);
        create_parents(&dst)?;
        converter.convert(src, &dst)?;
        let hash = self.hash(&out_rel)?;
        Ok((out_rel, hash))
    }

    /// Hash an output-relative file
    pub fn hash(&self, rel: &str) -> PaverResult<ContentHash> {
        let path = self.real_path(rel);
        ContentHash::from_file(&path).map_err(|source| PaverError::HashOutput { path, source })
    }

    /// Hash an output-relative file, mapping "not found" to `None`.
    ///
    /// The skip check treats a missing output as "rebuild", never as a fatal
    /// error; any other IO failure still aborts.
    pub fn hash_if_exists(&self, rel: &str) -> PaverResult<Option<ContentHash>> {
        let path = self.real_path(rel);
        match ContentHash::from_file(&path) {
            Ok(hash) => Ok(Some(hash)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(PaverError::HashOutput { path, source }),
        }
    }

    /// Walk the output tree and collect every relative path with no
    /// counterpart in the current task.
    ///
    /// Kept: the manifest file, directories, straight-copy matches, and
    /// converted-artifact matches (any convertible source extension swapped
    /// into the name is tracked). Everything else is stale. Empty directories
    /// are never pruned.
    pub fn stale_paths(&self, task: &Task) -> PaverResult<Vec<String>> {
        let mut stale = Vec::new();
        self.walk_stale(&self.root, "", task, &mut stale)?;
        Ok(stale)
    }

    fn walk_stale(
        &self,
        dir: &Path,
        rel_prefix: &str,
        task: &Task,
        stale: &mut Vec<String>,
    ) -> PaverResult<()> {
        let read_err = |source| PaverError::ReadDir {
            path: dir.to_path_buf(),
            source,
        };
        let mut entries: Vec<_> = std::fs::read_dir(dir)
            .map_err(read_err)?
            .collect::<Result<_, _>>()
            .map_err(read_err)?;
        entries.sort_by_key(|e| e.file_name());

        for entry in entries {
            let name = entry.file_name();
            let name = name.to_str().ok_or_else(|| PaverError::NonUtf8Name {
                path: entry.path(),
            })?;
            let rel = if rel_prefix.is_empty() {
                name.to_string()
            } else {
                format!("{rel_prefix}/{name}")
            };

            if entry.file_type()?.is_dir() {
                self.walk_stale(&entry.path(), &rel, task, stale)?;
                continue;
            }

            if rel == MANIFEST_FILE_NAME {
                continue;
            }

            // Straight-copy match
            if task.tracks(&rel) {
                continue;
            }

            // Converted-artifact match
            if convert_source_candidates(&rel)
                .iter()
                .any(|candidate| task.tracks(candidate))
            {
                continue;
            }

            stale.push(rel);
        }
        Ok(())
    }

    /// Delete a single output-relative file
    pub fn remove(&self, rel: &str) -> PaverResult<()> {
        std::fs::remove_file(self.real_path(rel))?;
        Ok(())
    }
}

/// Create every missing parent directory of an output path
fn create_parents(path: &Path) -> PaverResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| PaverError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

//! Reconciliation engine
//!
//! Diffs the previous manifest against the current scan and drives the
//! copy/convert actions. The decision per file is two-sided: an action is
//! skipped only when the source hash is unchanged AND the on-disk output
//! still hashes to what the manifest recorded. That second check makes the
//! cache self-healing when outputs are deleted or edited between runs, at
//! the cost of one extra hash per skip candidate.
//!
//! The run is fail-fast and its bookkeeping is atomic: actions execute one
//! at a time in walk order, and the caller persists the new manifest only
//! after the whole loop (and stale cleanup) succeeds. A run that dies midway
//! leaves the previous manifest untouched; any artifacts it already produced
//! are simply recomputed by the next successful run.

use crate::convert::Converter;
use crate::error::PaverResult;
use crate::manifest::{Manifest, ManifestEntry};
use crate::output::OutputStore;
use crate::source::{Source, Task};

/// Progress event emitted while executing the action loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildEvent {
    Copied { path: String },
    Converted { path: String, output: String },
    Skipped { path: String },
}

/// Tally of what a build run did
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    /// Paths copied verbatim
    pub copied: Vec<String>,
    /// Paths run through the converter
    pub converted: Vec<String>,
    /// Paths left alone because source and output were both unchanged
    pub skipped: Vec<String>,
}

impl BuildReport {
    /// Number of actions actually performed
    pub fn actions(&self) -> usize {
        self.copied.len() + self.converted.len()
    }
}

/// Read-only preview of what a build would do
#[derive(Debug, Clone, Default)]
pub struct Plan {
    pub copy: Vec<String>,
    pub convert: Vec<String>,
    pub skip: Vec<String>,
    pub remove: Vec<String>,
}

impl Plan {
    /// Whether the build would change anything on disk
    pub fn is_noop(&self) -> bool {
        self.copy.is_empty() && self.convert.is_empty() && self.remove.is_empty()
    }
}

/// The skip decision for one path.
///
/// True iff the previous manifest knows the path with the same source hash
/// and the recorded output still exists with the recorded hash.
fn up_to_date(
    previous: &Manifest,
    store: &OutputStore,
    path: &str,
    task: &Task,
) -> PaverResult<bool> {
    let current = match task.source_hash(path) {
        Some(hash) => hash,
        None => return Ok(false),
    };
    let prev = match previous.get(path) {
        Some(entry) => entry,
        None => return Ok(false),
    };
    if prev.source_hash() != current {
        return Ok(false);
    }
    let on_disk = store.hash_if_exists(prev.output_path(path))?;
    Ok(on_disk == Some(prev.output_hash()))
}

/// Execute the full action loop: every copy path, then every convert path,
/// each in walk order. Returns the new manifest (to be persisted by the
/// caller once cleanup succeeds) and a report of what happened.
pub fn execute(
    source: &Source,
    task: &Task,
    previous: &Manifest,
    store: &OutputStore,
    converter: &dyn Converter,
    mut on_event: impl FnMut(&BuildEvent),
) -> PaverResult<(Manifest, BuildReport)> {
    let mut manifest = Manifest::new();
    let mut report = BuildReport::default();

    for path in &task.copy {
        if up_to_date(previous, store, path, task)? {
            // Carry the previous entry forward so a skip never loses the
            // recorded output mapping
            manifest.insert(path.clone(), previous.get(path).cloned().unwrap());
            report.skipped.push(path.clone());
            on_event(&BuildEvent::Skipped { path: path.clone() });
            continue;
        }

        store.copy_from(&source.real_path(path), path)?;
        let hash = task.source_hash(path).unwrap();
        manifest.insert(path.clone(), ManifestEntry::Verbatim { hash });
        report.copied.push(path.clone());
        on_event(&BuildEvent::Copied { path: path.clone() });
    }

    for path in &task.convert {
        if up_to_date(previous, store, path, task)? {
            manifest.insert(path.clone(), previous.get(path).cloned().unwrap());
            report.skipped.push(path.clone());
            on_event(&BuildEvent::Skipped { path: path.clone() });
            continue;
        }

        let (output_path, output_hash) =
            store.convert_with(converter, &source.real_path(path), path)?;
        let source_hash = task.source_hash(path).unwrap();
        on_event(&BuildEvent::Converted {
            path: path.clone(),
            output: output_path.clone(),
        });
        manifest.insert(
            path.clone(),
            ManifestEntry::Transformed {
                source_hash,
                output_path: output_path.clone(),
                output_hash,
            },
        );
        report.converted.push(path.clone());
    }

    Ok((manifest, report))
}

/// Compute the same decisions as [`execute`] without touching the output
/// tree: which paths would be copied, converted, skipped, and removed.
pub fn plan(task: &Task, previous: &Manifest, store: &OutputStore) -> PaverResult<Plan> {
    let mut plan = Plan::default();

    for path in &task.copy {
        if up_to_date(previous, store, path, task)? {
            plan.skip.push(path.clone());
        } else {
            plan.copy.push(path.clone());
        }
    }
    for path in &task.convert {
        if up_to_date(previous, store, path, task)? {
            plan.skip.push(path.clone());
        } else {
            plan.convert.push(path.clone());
        }
    }
    plan.remove = store.stale_paths(task)?;

    Ok(plan)
}

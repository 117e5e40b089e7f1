//! Sync engine — track / refresh / apply-updates over one manifest.
//!
//! ## Per-file decision table
//!
//! Driven by comparing the local content hash (or absence) against the
//! manifest history tail:
//!
//! - absent, tail ≠ `deleted` — `refresh` appends `deleted` and removes the
//!   store copy; `apply_updates` restores from the store.
//! - absent, tail = `deleted` — both operations are no-ops.
//! - hash = tail — in sync, no-op everywhere.
//! - hash earlier in history — `apply_updates` advances the file to the
//!   store version; `refresh` absorbs it as a new authored version.
//! - hash not in history — `apply_updates` reports a conflict and leaves the
//!   file alone; `refresh` absorbs it.
//!
//! Transfers happen before history appends, so a failed copy never leaves a
//! phantom entry. The manifest is saved once, at the end of a mutating batch.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use curator_core::{HistoryEntry, Manifest};

use crate::error::{io_err, SyncError};
use crate::{hasher, transport};

/// `<store_root>/manifest` — the manifest file for a store. Pure, no I/O.
///
/// File copies live under [`files_root`], not directly in the store root, so
/// no tracked filename can collide with the manifest itself.
pub fn manifest_path(store_root: &Path) -> PathBuf {
    store_root.join("manifest")
}

/// `<store_root>/files` — root of the mirrored file copies. Pure, no I/O.
pub fn files_root(store_root: &Path) -> PathBuf {
    store_root.join("files")
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Outcome of tracking a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackOutcome {
    /// The file is now tracked with a fresh single-entry history.
    Tracked { path: PathBuf, hash: String },
    /// The file was already tracked; its history is untouched but the store
    /// copy was refreshed from the local file.
    AlreadyTracked { path: PathBuf },
}

/// Outcome of one file during a `refresh` batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Local hash equals the history tail; nothing to do.
    Unchanged { path: PathBuf },
    /// A new local version was appended to history and copied into the store.
    Absorbed { path: PathBuf, hash: String },
    /// The file disappeared locally; the `deleted` sentinel was recorded and
    /// the store copy removed.
    DeletionRecorded { path: PathBuf },
    /// The deletion was already recorded on a previous run.
    AlreadyDeleted { path: PathBuf },
    /// An I/O failure; the batch continued with the remaining files.
    Failed { path: PathBuf, message: String },
}

/// Outcome of one file during an `apply_updates` batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Local hash equals the history tail; nothing to do.
    UpToDate { path: PathBuf },
    /// Local file was an older known version and was advanced to the store
    /// version.
    Advanced { path: PathBuf },
    /// Local file was absent and was restored from the store.
    Restored { path: PathBuf },
    /// Local file was modified independently of every known version; it was
    /// left untouched.
    Conflict { path: PathBuf, hash: String },
    /// History tail is the `deleted` sentinel; the file is not resurrected.
    SkippedDeleted { path: PathBuf },
    /// An I/O failure; the batch continued with the remaining files.
    Failed { path: PathBuf, message: String },
}

/// Summary of a `refresh` batch.
#[derive(Debug, Default)]
pub struct RefreshReport {
    pub outcomes: Vec<RefreshOutcome>,
}

impl RefreshReport {
    /// Files whose history changed in this batch.
    pub fn changed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| {
                matches!(
                    o,
                    RefreshOutcome::Absorbed { .. } | RefreshOutcome::DeletionRecorded { .. }
                )
            })
            .count()
    }
}

/// Summary of an `apply_updates` batch.
#[derive(Debug, Default)]
pub struct ApplyReport {
    pub outcomes: Vec<ApplyOutcome>,
}

impl ApplyReport {
    pub fn has_conflicts(&self) -> bool {
        self.outcomes
            .iter()
            .any(|o| matches!(o, ApplyOutcome::Conflict { .. }))
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Batch sync engine over one project checkout, one store, and one manifest.
///
/// The manifest is loaded exactly once, at construction, and owned by the
/// engine for the duration of the batch — there is no hidden process-wide
/// cache. Mutating operations persist it before returning.
#[derive(Debug)]
pub struct SyncEngine {
    project_root: PathBuf,
    store_root: PathBuf,
    manifest_path: PathBuf,
    manifest: Manifest,
}

impl SyncEngine {
    /// Open an engine over `project_root` and `store_root`, loading the
    /// manifest at `<store_root>/manifest` (empty if it does not exist yet).
    pub fn open(
        project_root: impl Into<PathBuf>,
        store_root: impl Into<PathBuf>,
    ) -> Result<Self, SyncError> {
        let store_root = store_root.into();
        let manifest_path = manifest_path(&store_root);
        let manifest = Manifest::load(&manifest_path)?;
        Ok(Self {
            project_root: project_root.into(),
            store_root,
            manifest_path,
            manifest,
        })
    }

    /// The manifest as loaded plus any mutations from this batch.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Absolute path of a tracked file inside the project checkout.
    pub fn local_path(&self, file: &str) -> PathBuf {
        self.project_root.join(file)
    }

    /// Absolute path of a tracked file's mirror inside the store.
    pub fn store_path(&self, file: &str) -> PathBuf {
        files_root(&self.store_root).join(file)
    }

    // -----------------------------------------------------------------------
    // track
    // -----------------------------------------------------------------------

    /// Start tracking `file` (a path relative to the project root).
    ///
    /// Hashes the local file, records a single-entry history if the file is
    /// new to the manifest, copies the local bytes into the store, and
    /// persists the manifest. Tracking an already-tracked file never fails
    /// and never touches its history.
    pub fn track(&mut self, file: &str) -> Result<TrackOutcome, SyncError> {
        validate_rel_path(file)?;

        let local = self.local_path(file);
        let digest = hasher::hash_file(&local)?;
        let already_tracked = self.manifest.get(file).is_some();

        self.manifest
            .set_or_init(file, HistoryEntry::Hash(digest.clone()));
        transport::copy(&local, &self.store_path(file))?;
        self.manifest.save(&self.manifest_path)?;

        if already_tracked {
            tracing::debug!("already tracked: {file}");
            Ok(TrackOutcome::AlreadyTracked { path: local })
        } else {
            tracing::info!("tracked: {file} ({digest})");
            Ok(TrackOutcome::Tracked {
                path: local,
                hash: digest,
            })
        }
    }

    // -----------------------------------------------------------------------
    // refresh
    // -----------------------------------------------------------------------

    /// Absorb project-side changes into the store (authoring direction).
    ///
    /// Iterates every tracked file; appends new hashes and `deleted`
    /// sentinels as the decision table dictates. Per-file I/O failures become
    /// [`RefreshOutcome::Failed`] and the batch continues. The manifest is
    /// always saved at the end, even when nothing changed, so the recorded
    /// state is durable before the next run.
    pub fn refresh(&mut self) -> Result<RefreshReport, SyncError> {
        let files: Vec<String> = self.manifest.files().map(str::to_string).collect();

        let mut report = RefreshReport::default();
        for file in files {
            let outcome = match self.refresh_file(&file) {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::warn!("refresh failed for '{file}': {e}");
                    RefreshOutcome::Failed {
                        path: self.local_path(&file),
                        message: e.to_string(),
                    }
                }
            };
            report.outcomes.push(outcome);
        }

        self.manifest.save(&self.manifest_path)?;
        Ok(report)
    }

    fn refresh_file(&mut self, file: &str) -> Result<RefreshOutcome, SyncError> {
        // Manifest files can be hand-edited; never follow an entry outside
        // the project and store roots.
        validate_rel_path(file)?;
        let local = self.local_path(file);
        let Some(bytes) = read_optional(&local)? else {
            if self.tail_is_deleted(file) {
                return Ok(RefreshOutcome::AlreadyDeleted { path: local });
            }
            // Remove the store copy first: if that fails, no sentinel is
            // recorded and the next run retries.
            transport::remove(&self.store_path(file))?;
            self.manifest.append(file, HistoryEntry::Deleted)?;
            tracing::info!("deletion recorded: {file}");
            return Ok(RefreshOutcome::DeletionRecorded { path: local });
        };

        let digest = hasher::hash_bytes(&bytes);
        let entry = HistoryEntry::Hash(digest.clone());
        if self.manifest.last(file) == Some(&entry) {
            return Ok(RefreshOutcome::Unchanged { path: local });
        }

        transport::copy(&local, &self.store_path(file))?;
        self.manifest.append(file, entry)?;
        tracing::info!("absorbed: {file} ({digest})");
        Ok(RefreshOutcome::Absorbed {
            path: local,
            hash: digest,
        })
    }

    // -----------------------------------------------------------------------
    // apply_updates
    // -----------------------------------------------------------------------

    /// Push store-side updates into the project (distribution direction).
    ///
    /// Iterates every tracked file whose history tail is not `deleted`.
    /// Conflicting files (local hash unknown to the history) are reported and
    /// left byte-for-byte untouched; one conflict never blocks the rest of
    /// the batch. The manifest is not mutated and therefore not persisted.
    pub fn apply_updates(&self) -> Result<ApplyReport, SyncError> {
        let mut report = ApplyReport::default();
        for file in self.manifest.files() {
            let outcome = match self.apply_file(file) {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::warn!("apply failed for '{file}': {e}");
                    ApplyOutcome::Failed {
                        path: self.local_path(file),
                        message: e.to_string(),
                    }
                }
            };
            report.outcomes.push(outcome);
        }
        Ok(report)
    }

    fn apply_file(&self, file: &str) -> Result<ApplyOutcome, SyncError> {
        validate_rel_path(file)?;
        let local = self.local_path(file);
        if self.tail_is_deleted(file) {
            return Ok(ApplyOutcome::SkippedDeleted { path: local });
        }

        let Some(bytes) = read_optional(&local)? else {
            self.copy_baseline(file)?;
            tracing::info!("restored: {file}");
            return Ok(ApplyOutcome::Restored { path: local });
        };

        let digest = hasher::hash_bytes(&bytes);
        let entry = HistoryEntry::Hash(digest.clone());
        if self.manifest.last(file) == Some(&entry) {
            return Ok(ApplyOutcome::UpToDate { path: local });
        }
        if self.manifest.contains(file, &entry) {
            self.copy_baseline(file)?;
            tracing::info!("advanced: {file}");
            return Ok(ApplyOutcome::Advanced { path: local });
        }

        tracing::warn!("conflict: '{file}' has unrecognized local hash {digest}; not overwriting");
        Ok(ApplyOutcome::Conflict {
            path: local,
            hash: digest,
        })
    }

    /// Copy the store copy of `file` over the local path, creating local
    /// directories as needed. The primitive behind restore and advance.
    pub fn copy_baseline(&self, file: &str) -> Result<(), SyncError> {
        transport::copy(&self.store_path(file), &self.local_path(file))
    }

    fn tail_is_deleted(&self, file: &str) -> bool {
        self.manifest
            .last(file)
            .is_some_and(HistoryEntry::is_deleted)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_optional(path: &Path) -> Result<Option<Vec<u8>>, SyncError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(io_err(path, e)),
    }
}

fn validate_rel_path(file: &str) -> Result<(), SyncError> {
    let invalid = |reason: &str| SyncError::InvalidPath {
        path: file.to_string(),
        reason: reason.to_string(),
    };
    if file.is_empty() {
        return Err(invalid("path is empty"));
    }
    if file.contains(':') {
        return Err(invalid("path may not contain the manifest delimiter ':'"));
    }
    if Path::new(file).is_absolute() {
        return Err(invalid("path must be relative to the project root"));
    }
    if Path::new(file)
        .components()
        .any(|c| matches!(c, std::path::Component::ParentDir))
    {
        return Err(invalid("path may not traverse outside the project root"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

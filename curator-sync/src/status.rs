//! Read-only per-file status classification for `curator status`.
//!
//! State precedence per tracked file:
//! 1. `Deleted` (history tail is the sentinel)
//! 2. `Missing` (local file absent)
//! 3. `Current` (local hash equals the tail)
//! 4. `Behind` (local hash appears earlier in history)
//! 5. `Diverged` (local hash unknown to the history)

use std::io::ErrorKind;
use std::path::PathBuf;

use curator_core::HistoryEntry;

use crate::error::{io_err, SyncError};
use crate::{hasher, SyncEngine};

/// Classification of one tracked file against its manifest history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileState {
    /// Local hash equals the history tail.
    Current,
    /// Local hash is an older known version; `apply` would advance it.
    Behind,
    /// Local hash is unknown to the history; `apply` would report a conflict.
    Diverged { hash: String },
    /// Local file absent while the tail is not `deleted`.
    Missing,
    /// History tail is the `deleted` sentinel.
    Deleted,
}

/// Status row for one tracked file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStatus {
    /// Manifest-relative path.
    pub file: String,
    /// Local path inside the project checkout.
    pub path: PathBuf,
    pub state: FileState,
    /// Number of recorded history entries.
    pub versions: usize,
}

/// Classify every tracked file in the engine's manifest.
///
/// Purely observational: no files are copied and the manifest is untouched.
pub fn check(engine: &SyncEngine) -> Result<Vec<FileStatus>, SyncError> {
    let mut rows = Vec::new();
    for (file, history) in engine.manifest().iter() {
        rows.push(FileStatus {
            file: file.to_string(),
            path: engine.local_path(file),
            state: classify(engine, file, history)?,
            versions: history.len(),
        });
    }
    Ok(rows)
}

fn classify(
    engine: &SyncEngine,
    file: &str,
    history: &[HistoryEntry],
) -> Result<FileState, SyncError> {
    if history.last().is_some_and(HistoryEntry::is_deleted) {
        return Ok(FileState::Deleted);
    }

    let local = engine.local_path(file);
    let bytes = match std::fs::read(&local) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(FileState::Missing),
        Err(e) => return Err(io_err(&local, e)),
    };

    let digest = hasher::hash_bytes(&bytes);
    let entry = HistoryEntry::Hash(digest.clone());
    if history.last() == Some(&entry) {
        Ok(FileState::Current)
    } else if history.contains(&entry) {
        Ok(FileState::Behind)
    } else {
        Ok(FileState::Diverged { hash: digest })
    }
}

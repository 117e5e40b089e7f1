//! Line-oriented manifest — per-file content-hash histories.
//!
//! # On-disk format
//!
//! ```text
//! relative/path:hash1:hash2:...:hashN
//! ```
//!
//! One line per tracked file, colon-delimited, UTF-8. A hash is either a
//! lowercase hex digest or the literal `deleted` sentinel. Filenames may not
//! contain the delimiter.
//!
//! Writes use the same atomic `.tmp` + rename pattern as everything else in
//! this workspace.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::ManifestError;
use crate::types::HistoryEntry;

/// In-memory manifest: tracked relative paths mapped to their ordered hash
/// histories.
///
/// Backed by a `BTreeMap` so iteration and serialization order is stable and
/// the saved file stays diffable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    entries: BTreeMap<String, Vec<HistoryEntry>>,
}

impl Manifest {
    /// An empty manifest with no tracked files.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a manifest from `path`.
    ///
    /// A missing file yields an empty manifest, not an error. Malformed lines
    /// (no delimiter, empty filename, empty hash segment) are skipped with a
    /// warning; an empty history would violate the never-empty invariant.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let contents = std::fs::read_to_string(path)?;
        let mut entries = BTreeMap::new();
        for line in contents.lines() {
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            let parts: Vec<&str> = line.split(':').collect();
            if parts.len() < 2 || parts.iter().any(|p| p.is_empty()) {
                tracing::warn!("skipping malformed manifest line: {line:?}");
                continue;
            }
            let history: Vec<HistoryEntry> =
                parts[1..].iter().copied().map(HistoryEntry::from).collect();
            entries.insert(parts[0].to_string(), history);
        }
        Ok(Self { entries })
    }

    /// The ordered hash history for `file`, or `None` if untracked.
    pub fn get(&self, file: &str) -> Option<&[HistoryEntry]> {
        self.entries.get(file).map(Vec::as_slice)
    }

    /// The final history entry for `file` — its current known state.
    pub fn last(&self, file: &str) -> Option<&HistoryEntry> {
        self.entries.get(file).and_then(|history| history.last())
    }

    /// Whether `entry` appears anywhere in the history of `file`.
    pub fn contains(&self, file: &str, entry: &HistoryEntry) -> bool {
        self.entries
            .get(file)
            .is_some_and(|history| history.contains(entry))
    }

    /// Start tracking `file` with a single-entry history, or do nothing if it
    /// is already tracked. Tracking never overwrites existing history.
    pub fn set_or_init(&mut self, file: &str, entry: HistoryEntry) {
        self.entries
            .entry(file.to_string())
            .or_insert_with(|| vec![entry]);
    }

    /// Append one entry to the history of `file`.
    ///
    /// Fails with [`ManifestError::NotTracked`] if the file has no entry;
    /// histories are only ever created through [`Manifest::set_or_init`].
    pub fn append(&mut self, file: &str, entry: HistoryEntry) -> Result<(), ManifestError> {
        match self.entries.get_mut(file) {
            Some(history) => {
                history.push(entry);
                Ok(())
            }
            None => Err(ManifestError::NotTracked {
                file: file.to_string(),
            }),
        }
    }

    /// Save the manifest to `path` atomically, overwriting any previous file.
    ///
    /// Write flow: serialize → `<path>.tmp` sibling → `rename`. The `.tmp` is
    /// removed if the rename fails, leaving the previous manifest intact.
    pub fn save(&self, path: &Path) -> Result<(), ManifestError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let mut out = String::new();
        for (file, history) in &self.entries {
            out.push_str(file);
            for entry in history {
                out.push(':');
                out.push_str(entry.as_str());
            }
            out.push('\n');
        }

        let tmp = PathBuf::from(format!("{}.tmp", path.display()));
        std::fs::write(&tmp, out)?;
        if let Err(e) = std::fs::rename(&tmp, path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }

    /// Tracked filenames in stable (sorted) order.
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Tracked filenames with their histories, in stable (sorted) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[HistoryEntry])> {
        self.entries
            .iter()
            .map(|(file, history)| (file.as_str(), history.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Domain types for the curator manifest.

use std::fmt;

/// On-disk token recording that a tracked file was intentionally removed
/// from the project side.
pub const DELETED_TOKEN: &str = "deleted";

/// One element of a tracked file's hash history.
///
/// A history is an ordered, append-only sequence of these; the final element
/// is the current known state of the file. [`HistoryEntry::Deleted`] only ever
/// appears as the final element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HistoryEntry {
    /// Lowercase hex content digest of a known version of the file.
    Hash(String),
    /// The file no longer exists on the project side; do not resurrect it.
    Deleted,
}

impl HistoryEntry {
    /// The on-disk token form: the digest itself, or the `deleted` sentinel.
    pub fn as_str(&self) -> &str {
        match self {
            HistoryEntry::Hash(digest) => digest,
            HistoryEntry::Deleted => DELETED_TOKEN,
        }
    }

    pub fn is_deleted(&self) -> bool {
        matches!(self, HistoryEntry::Deleted)
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for HistoryEntry {
    fn from(token: &str) -> Self {
        if token == DELETED_TOKEN {
            HistoryEntry::Deleted
        } else {
            HistoryEntry::Hash(token.to_owned())
        }
    }
}

impl From<String> for HistoryEntry {
    fn from(token: String) -> Self {
        if token == DELETED_TOKEN {
            HistoryEntry::Deleted
        } else {
            HistoryEntry::Hash(token)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_token_parses_to_deleted() {
        assert_eq!(HistoryEntry::from("deleted"), HistoryEntry::Deleted);
        assert!(HistoryEntry::from(String::from("deleted")).is_deleted());
    }

    #[test]
    fn digest_token_parses_to_hash() {
        let entry = HistoryEntry::from("5d41402abc4b2a76b9719d911017c592");
        assert_eq!(
            entry,
            HistoryEntry::Hash("5d41402abc4b2a76b9719d911017c592".to_string())
        );
        assert!(!entry.is_deleted());
    }

    #[test]
    fn display_roundtrips_the_token() {
        assert_eq!(HistoryEntry::Deleted.to_string(), "deleted");
        assert_eq!(HistoryEntry::from("cafebabe").to_string(), "cafebabe");
    }
}

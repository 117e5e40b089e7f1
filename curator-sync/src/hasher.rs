//! Content hashing — SHA-256 over raw file bytes.
//!
//! Hashes are the engine's only notion of file identity: two files are "the
//! same version" exactly when their digests match. No line-ending or encoding
//! normalization is applied; the comparison is over raw bytes.

use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{io_err, SyncError};

/// Lowercase hex SHA-256 digest of `bytes`.
pub fn hash_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Lowercase hex SHA-256 digest of the file at `path`.
pub fn hash_file(path: &Path) -> Result<String, SyncError> {
    let bytes = std::fs::read(path).map_err(|e| io_err(path, e))?;
    Ok(hash_bytes(&bytes))
}

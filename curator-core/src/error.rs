//! Error types for curator-core.

use thiserror::Error;

/// All errors that can arise from manifest operations.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Underlying I/O failure (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Attempted to append history for a file the manifest does not track.
    /// Callers always go through `track` or manifest iteration first, so this
    /// indicates a programming error rather than an expected runtime state.
    #[error("file is not tracked: {file}")]
    NotTracked { file: String },
}

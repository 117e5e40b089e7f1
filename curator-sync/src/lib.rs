//! # curator-sync
//!
//! Manifest-driven file synchronization engine.
//!
//! Construct a [`SyncEngine`] over a project checkout and a store root, then
//! call [`SyncEngine::track`] to start tracking a file,
//! [`SyncEngine::refresh`] to absorb project-side edits into the store, or
//! [`SyncEngine::apply_updates`] to push store-side updates into the project.

pub mod engine;
pub mod error;
pub mod hasher;
pub mod status;
pub mod transport;

pub use engine::{
    files_root, manifest_path, ApplyOutcome, ApplyReport, RefreshOutcome, RefreshReport,
    SyncEngine, TrackOutcome,
};
pub use error::SyncError;
pub use status::{FileState, FileStatus};

//! Curator core library — manifest data model, persistence, errors.
//!
//! Public API surface:
//! - [`types`] — [`HistoryEntry`] and the `deleted` sentinel token
//! - [`error`] — [`ManifestError`]
//! - [`manifest`] — [`Manifest`] load / mutate / save

pub mod error;
pub mod manifest;
pub mod types;

pub use error::ManifestError;
pub use manifest::Manifest;
pub use types::{HistoryEntry, DELETED_TOKEN};

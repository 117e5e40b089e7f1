//! Subcommand implementations.

pub mod apply;
pub mod refresh;
pub mod status;
pub mod track;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use curator_sync::SyncEngine;

/// Shared location arguments: where the project checkout and the store live.
#[derive(Args, Debug)]
pub struct LocationArgs {
    /// Project checkout root. Defaults to the current directory.
    #[arg(long, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Store root holding the manifest and published file copies.
    /// Defaults to ~/.curator/store.
    #[arg(long, value_name = "PATH")]
    pub store: Option<PathBuf>,
}

impl LocationArgs {
    /// Resolve the locations and load the manifest into a [`SyncEngine`].
    pub fn open_engine(&self) -> Result<SyncEngine> {
        let dir = match &self.dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().context("could not determine current directory")?,
        };
        let store = match &self.store {
            Some(store) => store.clone(),
            None => dirs::home_dir()
                .context("could not determine home directory")?
                .join(".curator")
                .join("store"),
        };
        SyncEngine::open(&dir, &store)
            .with_context(|| format!("failed to load manifest from store '{}'", store.display()))
    }
}

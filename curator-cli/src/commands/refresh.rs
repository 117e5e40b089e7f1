//! `curator refresh` — absorb project edits into the store.

use anyhow::{Context, Result};
use clap::Args;

use curator_sync::RefreshOutcome;

use super::LocationArgs;

/// Arguments for `curator refresh`.
#[derive(Args, Debug)]
pub struct RefreshArgs {
    #[command(flatten)]
    pub location: LocationArgs,
}

impl RefreshArgs {
    pub fn run(self) -> Result<()> {
        let mut engine = self.location.open_engine()?;
        let report = engine.refresh().context("refresh failed")?;

        if report.outcomes.is_empty() {
            println!("No files tracked. Run `curator track` first.");
            return Ok(());
        }

        for outcome in &report.outcomes {
            match outcome {
                RefreshOutcome::Absorbed { path, .. } => println!("  ✎  {}", path.display()),
                RefreshOutcome::DeletionRecorded { path } => {
                    println!("  ✗  {} (deletion recorded)", path.display());
                }
                RefreshOutcome::Unchanged { path }
                | RefreshOutcome::AlreadyDeleted { path } => {
                    println!("  ·  {}", path.display());
                }
                RefreshOutcome::Failed { path, message } => {
                    println!("  !  {}: {message}", path.display());
                }
            }
        }

        println!(
            "✓ refresh complete ({} changed, {} tracked)",
            report.changed(),
            report.outcomes.len()
        );
        Ok(())
    }
}

//! `curator apply` — apply store-side updates to the project.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use curator_sync::ApplyOutcome;

use super::LocationArgs;

/// Arguments for `curator apply`.
#[derive(Args, Debug)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub location: LocationArgs,
}

impl ApplyArgs {
    pub fn run(self) -> Result<()> {
        let engine = self.location.open_engine()?;
        let report = engine.apply_updates().context("apply failed")?;

        if report.outcomes.is_empty() {
            println!("No files tracked. Run `curator track` first.");
            return Ok(());
        }

        let mut conflicts = 0;
        for outcome in &report.outcomes {
            match outcome {
                ApplyOutcome::Advanced { path } => {
                    println!("  ✎  {} (advanced)", path.display());
                }
                ApplyOutcome::Restored { path } => {
                    println!("  ✎  {} (restored)", path.display());
                }
                ApplyOutcome::UpToDate { path } => println!("  ·  {}", path.display()),
                ApplyOutcome::SkippedDeleted { path } => {
                    println!("  ·  {} (deleted)", path.display());
                }
                ApplyOutcome::Conflict { path, hash } => {
                    conflicts += 1;
                    println!(
                        "  {}  {} — local edit with unknown hash {hash}; resolve manually",
                        "!".red().bold(),
                        path.display()
                    );
                }
                ApplyOutcome::Failed { path, message } => {
                    println!("  !  {}: {message}", path.display());
                }
            }
        }

        println!("✓ apply complete ({} file(s))", report.outcomes.len());
        if conflicts > 0 {
            println!(
                "{}",
                format!("{conflicts} conflicting file(s) were left untouched").yellow()
            );
        }
        Ok(())
    }
}

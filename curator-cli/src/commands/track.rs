//! `curator track <file>...` — start tracking project files.

use anyhow::{Context, Result};
use clap::Args;

use curator_sync::TrackOutcome;

use super::LocationArgs;

/// Arguments for `curator track`.
#[derive(Args, Debug)]
pub struct TrackArgs {
    /// Files to track, as paths relative to the project root.
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<String>,

    #[command(flatten)]
    pub location: LocationArgs,
}

impl TrackArgs {
    pub fn run(self) -> Result<()> {
        let mut engine = self.location.open_engine()?;

        let mut new = 0;
        for file in &self.files {
            let outcome = engine
                .track(file)
                .with_context(|| format!("failed to track '{file}'"))?;
            match outcome {
                TrackOutcome::Tracked { path, .. } => {
                    new += 1;
                    println!("  ✎  {}", path.display());
                }
                TrackOutcome::AlreadyTracked { path } => {
                    println!("  ·  {} (already tracked)", path.display());
                }
            }
        }

        println!(
            "✓ tracked {new} new file(s), {} already tracked",
            self.files.len() - new
        );
        Ok(())
    }
}

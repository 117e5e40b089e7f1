//! Curator — template file synchronization CLI.
//!
//! # Usage
//!
//! ```text
//! curator track <file>... [--dir <path>] [--store <path>]
//! curator refresh [--dir <path>] [--store <path>]
//! curator apply [--dir <path>] [--store <path>]
//! curator status [--dir <path>] [--store <path>] [--json]
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{apply::ApplyArgs, refresh::RefreshArgs, status::StatusArgs, track::TrackArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "curator",
    version,
    about = "Keep template files consistent between a store and project checkouts",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start tracking project files in the store.
    Track(TrackArgs),

    /// Absorb project-side edits into the store (authoring direction).
    Refresh(RefreshArgs),

    /// Apply store-side updates to the project (distribution direction).
    Apply(ApplyArgs),

    /// Show per-file sync state without changing anything.
    Status(StatusArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Track(args) => args.run(),
        Commands::Refresh(args) => args.run(),
        Commands::Apply(args) => args.run(),
        Commands::Status(args) => args.run(),
    }
}

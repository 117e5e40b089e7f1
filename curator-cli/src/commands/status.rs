//! `curator status` — per-file sync state visibility.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use curator_sync::{status, FileState, FileStatus};

use super::LocationArgs;

/// Arguments for `curator status`.
#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub location: LocationArgs,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl StatusArgs {
    pub fn run(self) -> Result<()> {
        let engine = self.location.open_engine()?;
        let rows = status::check(&engine).context("status check failed")?;

        if self.json {
            print_json(&rows)?;
            return Ok(());
        }
        print_table(&rows);
        Ok(())
    }
}

#[derive(Serialize)]
struct StatusReportJson {
    summary: StatusSummaryJson,
    files: Vec<FileStatusJson>,
}

#[derive(Serialize)]
struct StatusSummaryJson {
    tracked: usize,
    out_of_sync: usize,
}

#[derive(Serialize)]
struct FileStatusJson {
    file: String,
    state: String,
    detail: String,
    versions: usize,
}

#[derive(Tabled)]
struct StatusTableRow {
    #[tabled(rename = "file")]
    file: String,
    #[tabled(rename = "state")]
    state: String,
    #[tabled(rename = "detail")]
    detail: String,
    #[tabled(rename = "versions")]
    versions: usize,
}

fn out_of_sync(rows: &[FileStatus]) -> usize {
    rows.iter()
        .filter(|r| !matches!(r.state, FileState::Current | FileState::Deleted))
        .count()
}

fn print_json(rows: &[FileStatus]) -> Result<()> {
    let payload = StatusReportJson {
        summary: StatusSummaryJson {
            tracked: rows.len(),
            out_of_sync: out_of_sync(rows),
        },
        files: rows
            .iter()
            .map(|row| FileStatusJson {
                file: row.file.clone(),
                state: state_key(&row.state).to_string(),
                detail: state_detail(&row.state),
                versions: row.versions,
            })
            .collect(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("failed to serialize status JSON")?
    );
    Ok(())
}

fn print_table(rows: &[FileStatus]) {
    println!(
        "Curator v{} | {} tracked | {} out of sync",
        env!("CARGO_PKG_VERSION"),
        rows.len(),
        out_of_sync(rows),
    );

    if rows.is_empty() {
        println!("No files tracked.");
        return;
    }

    println!(
        "Indicators: {} CURRENT  {} BEHIND  {} DIVERGED  {} MISSING  {} DELETED",
        state_indicator(&FileState::Current),
        state_indicator(&FileState::Behind),
        state_indicator(&FileState::Diverged {
            hash: String::new(),
        }),
        state_indicator(&FileState::Missing),
        state_indicator(&FileState::Deleted),
    );

    let table_rows: Vec<StatusTableRow> = rows
        .iter()
        .map(|row| StatusTableRow {
            file: row.file.clone(),
            state: format!(
                "{} {}",
                state_indicator(&row.state),
                state_label(&row.state)
            ),
            detail: state_detail(&row.state),
            versions: row.versions,
        })
        .collect();
    let mut table = Table::new(table_rows);
    table.with(Style::rounded());
    println!("{table}");

    if out_of_sync(rows) > 0 {
        println!("Run 'curator apply' to pull updates, or 'curator refresh' to publish edits.");
    }
}

fn state_key(state: &FileState) -> &'static str {
    match state {
        FileState::Current => "current",
        FileState::Behind => "behind",
        FileState::Diverged { .. } => "diverged",
        FileState::Missing => "missing",
        FileState::Deleted => "deleted",
    }
}

fn state_label(state: &FileState) -> &'static str {
    match state {
        FileState::Current => "CURRENT",
        FileState::Behind => "BEHIND",
        FileState::Diverged { .. } => "DIVERGED",
        FileState::Missing => "MISSING",
        FileState::Deleted => "DELETED",
    }
}

fn state_indicator(state: &FileState) -> String {
    match state {
        FileState::Current => "■".green().bold().to_string(),
        FileState::Behind => "■".yellow().bold().to_string(),
        FileState::Diverged { .. } => "■".red().bold().to_string(),
        FileState::Missing => "■".magenta().bold().to_string(),
        FileState::Deleted => "■".bright_black().bold().to_string(),
    }
}

fn state_detail(state: &FileState) -> String {
    match state {
        FileState::Current => "up to date".to_string(),
        FileState::Behind => "older known version; 'curator apply' will advance it".to_string(),
        FileState::Diverged { hash } => format!("local edit ({}…)", &hash[..hash.len().min(12)]),
        FileState::Missing => "absent; 'curator apply' will restore it".to_string(),
        FileState::Deleted => "deletion recorded".to_string(),
    }
}

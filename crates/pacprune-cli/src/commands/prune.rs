//! Prune command - plan, confirm, delete.

use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Result};
use clap::Args;
use dialoguer::Confirm;
use pacprune_engine::{FsProvider, Planner};

use crate::report::{format_bytes, remove_entries, PlanReport};
use crate::PARTIAL_FAILURE;

/// Arguments for the prune command.
#[derive(Debug, Args)]
pub struct PruneArgs {
    /// Tree containing the repositories.
    pub root: PathBuf,

    /// Delete without asking.
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Execute the prune command.
///
/// Nothing is removed until the whole plan has been computed and shown.
///
/// # Errors
///
/// Returns an error if planning fails or confirmation cannot be obtained.
pub fn execute<F: FsProvider>(args: &PruneArgs, planner: &Planner<F>) -> Result<ExitCode> {
    let result = planner.plan(&args.root)?;
    let report = PlanReport::build(planner.fs(), &args.root, &result);

    let mut out = std::io::stdout().lock();
    report.write_text(&mut out)?;
    out.flush()?;
    if report.is_empty() {
        return Ok(ExitCode::SUCCESS);
    }

    if !args.yes {
        if !std::io::stdin().is_terminal() {
            bail!("refusing to delete without confirmation; pass --yes to prune non-interactively");
        }
        let prompt = format!(
            "Delete {} files ({})?",
            report.entries.len(),
            format_bytes(report.total_bytes)
        );
        if !Confirm::new().with_prompt(prompt).default(false).interact()? {
            writeln!(out, "Aborted, nothing deleted")?;
            return Ok(ExitCode::SUCCESS);
        }
    }

    let summary = remove_entries(&report.entries);
    tracing::info!(
        removed = summary.removed,
        bytes = summary.bytes,
        failures = summary.failures.len(),
        "prune complete"
    );
    writeln!(
        out,
        "Removed {} files, reclaimed {}",
        summary.removed,
        format_bytes(summary.bytes)
    )?;
    if summary.is_clean() {
        return Ok(ExitCode::SUCCESS);
    }

    for (path, error) in &summary.failures {
        eprintln!("failed to remove {}: {error}", path.display());
    }
    eprintln!("{} removals failed", summary.failures.len());
    Ok(ExitCode::from(PARTIAL_FAILURE))
}

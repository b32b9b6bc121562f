//! Plan command - show what a prune would delete.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use pacprune_engine::{FsProvider, Planner};

use crate::report::PlanReport;
use crate::OutputFormat;

/// Arguments for the plan command.
#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Tree containing the repositories.
    pub root: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t)]
    pub format: OutputFormat,
}

/// Execute the plan command. Never touches the filesystem beyond reading.
///
/// # Errors
///
/// Returns an error if planning fails or stdout cannot be written.
pub fn execute<F: FsProvider>(args: &PlanArgs, planner: &Planner<F>) -> Result<ExitCode> {
    let result = planner.plan(&args.root)?;
    let report = PlanReport::build(planner.fs(), &args.root, &result);

    let mut out = std::io::stdout().lock();
    match args.format {
        OutputFormat::Json => report.write_json(&mut out)?,
        OutputFormat::Text => report.write_text(&mut out)?,
    }
    out.flush()?;
    Ok(ExitCode::SUCCESS)
}

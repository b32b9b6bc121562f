//! # pacprune-cli
//!
//! Command-line driver for the retention engine.
//!
//! ## Commands
//!
//! - `pacprune plan <ROOT>` - Print what would be deleted
//! - `pacprune prune <ROOT>` - Print the plan, confirm, then delete
//!
//! ## Configuration
//!
//! Global flags override `PACPRUNE_*` environment variables, which override
//! `pacprune.toml` (or `--config`), which overrides `~/.pacprune/config.toml`.
//! The retention window has no default and must come from one of them.

#![forbid(unsafe_code)]
// CLI uses print! macros intentionally
#![allow(clippy::print_stdout)]
#![allow(clippy::print_stderr)]

pub mod commands;
pub mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use pacprune_core::config::CliOverrides;
use pacprune_core::{PruneConfig, PruneError};
use pacprune_engine::{OsFs, Planner, PlannerOptions};

/// Exit status when at least one removal failed.
pub const PARTIAL_FAILURE: u8 = 2;

/// Find and remove superseded files from package repository mirrors.
#[derive(Debug, Parser)]
#[command(name = "pacprune")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by every subcommand.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct GlobalArgs {
    /// Config file to use instead of ./pacprune.toml.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Retention window in days.
    #[arg(long, short = 'd', global = true)]
    pub retention_days: Option<u64>,

    /// Windows past the cutoff after which a dropped package loses its last build.
    #[arg(long, global = true)]
    pub grace_multiplier: Option<u32>,

    /// File name suffix of repository indices.
    #[arg(long, global = true)]
    pub index_suffix: Option<String>,

    /// Name of the shared sources directory next to each package directory.
    #[arg(long, global = true)]
    pub sources_dir: Option<String>,

    /// Worker threads (0 = one per core).
    #[arg(long, global = true)]
    pub threads: Option<usize>,

    /// More log output (-v info, -vv debug). `PACPRUNE_LOG` wins when set.
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

impl GlobalArgs {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            config_file: self.config.clone(),
            retention_days: self.retention_days,
            grace_multiplier: self.grace_multiplier,
            index_suffix: self.index_suffix.clone(),
            sources_dir: self.sources_dir.clone(),
            threads: self.threads,
        }
    }

    /// Fallback log directive for this verbosity.
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }

    /// Resolve every configuration layer into planner options.
    pub fn planner_options(&self) -> Result<PlannerOptions> {
        let cwd = std::env::current_dir().context("cannot determine the current directory")?;
        let config =
            PruneConfig::load(&cwd, Some(&self.overrides())).map_err(PruneError::from)?;
        Ok(PlannerOptions::from_config(&config).map_err(PruneError::from)?)
    }
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show which files would be deleted.
    Plan(commands::plan::PlanArgs),
    /// Delete the files a plan selects.
    Prune(commands::prune::PruneArgs),
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
}

/// Run a parsed command line.
pub fn run(cli: Cli) -> Result<ExitCode> {
    let options = cli.global.planner_options()?;
    let planner = Planner::new(OsFs, options);
    match cli.command {
        Commands::Plan(args) => commands::plan::execute(&args, &planner),
        Commands::Prune(args) => commands::prune::execute(&args, &planner),
    }
}

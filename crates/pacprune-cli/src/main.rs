//! The `pacprune` binary.

use std::process::ExitCode;

use clap::Parser;
use pacprune_cli::Cli;
use pacprune_core::{PruneError, PruneErrorCode};

fn main() -> ExitCode {
    let cli = Cli::parse();
    pacprune_core::tracing::init_tracing_with_default(cli.global.log_directive());

    match pacprune_cli::run(cli) {
        Ok(code) => code,
        Err(e) => {
            match e.downcast_ref::<PruneError>() {
                Some(prune) => eprintln!("error: {}", prune.coded_string()),
                None => eprintln!("error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

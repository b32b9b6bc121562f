//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::LOG_ENV_VAR;

static INIT: Once = Once::new();

/// Initialize the pacprune tracing/logging system.
///
/// Reads the `PACPRUNE_LOG` environment variable for per-module log levels.
/// Format: `PACPRUNE_LOG=pacprune_engine=debug,pacprune_cli=info`
///
/// Falls back to `default_directive` (the CLI raises it with `-v`) if
/// `PACPRUNE_LOG` is not set or is invalid.
///
/// This function is idempotent; calling it multiple times is safe.
pub fn init_tracing_with_default(default_directive: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(default_directive));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .with(filter)
            .init();
    });
}

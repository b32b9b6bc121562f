//! # pacprune-core
//!
//! Foundation crate for pacprune.
//! Defines errors, config, tracing setup, constants, and shared collection types.
//! The engine and the CLI both depend on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

pub use config::PruneConfig;
pub use errors::{PruneError, PruneErrorCode};

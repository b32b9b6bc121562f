//! Observability for pacprune.
//! `tracing` crate with `EnvFilter`, per-module log levels.
//!
//! Span and event fields use snake_case keys shared across crates:
//! `index_path`, `prune_dir`, `pattern_count`, `group_count`, `deletable_count`.

pub mod setup;

pub use setup::init_tracing_with_default;

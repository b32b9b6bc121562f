//! Configuration system for pacprune.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod prune_config;
pub mod retention_config;
pub mod scan_config;

pub use prune_config::{CliOverrides, PruneConfig};
pub use retention_config::RetentionConfig;
pub use scan_config::ScanConfig;

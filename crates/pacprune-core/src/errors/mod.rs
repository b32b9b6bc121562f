//! Error handling for pacprune.
//! One error enum per subsystem, `thiserror` only. The CLI binary is the sole `anyhow` user.

pub mod archive_error;
pub mod config_error;
pub mod error_code;
pub mod layout_error;
pub mod prune_error;
pub mod record_error;
pub mod stat_error;

pub use archive_error::ArchiveError;
pub use config_error::ConfigError;
pub use error_code::PruneErrorCode;
pub use layout_error::LayoutError;
pub use prune_error::{PlanResult, PruneError};
pub use record_error::RecordError;
pub use stat_error::StatError;

//! Run-level errors and non-fatal error collection.

use super::error_code::PruneErrorCode;
use super::{ArchiveError, ConfigError, LayoutError, RecordError, StatError};

/// Errors that abort a prune run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PruneError {
    #[error("Archive error: {0}")]
    Archive(#[from] ArchiveError),

    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Stat error: {0}")]
    Stat(#[from] StatError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl PruneErrorCode for PruneError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Archive(e) => e.error_code(),
            Self::Record(e) => e.error_code(),
            Self::Layout(e) => e.error_code(),
            Self::Stat(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }

    fn is_fatal(&self) -> bool {
        match self {
            Self::Stat(e) => e.is_fatal(),
            _ => true,
        }
    }
}

/// Result of a planning run that accumulates non-fatal stat failures.
#[derive(Debug, Default)]
pub struct PlanResult<T: Default = ()> {
    /// The computed data.
    pub data: T,
    /// Non-fatal errors collected during the run.
    pub errors: Vec<StatError>,
}

impl<T: Default> PlanResult<T> {
    /// Create a new result without errors.
    pub fn new(data: T) -> Self {
        Self {
            data,
            errors: Vec::new(),
        }
    }

    /// Add a non-fatal error to the result.
    pub fn add_error(&mut self, error: StatError) {
        self.errors.push(error);
    }

    /// Append every error from another run.
    pub fn extend_errors(&mut self, errors: impl IntoIterator<Item = StatError>) {
        self.errors.extend(errors);
    }

    /// Returns true if there are no non-fatal errors.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of non-fatal errors.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}

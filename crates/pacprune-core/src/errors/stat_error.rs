//! Per-entry stat errors. Non-fatal.

use std::path::PathBuf;

use super::error_code::{self, PruneErrorCode};

/// A timestamp or size read that failed after the entry was listed.
#[derive(Debug, thiserror::Error)]
pub enum StatError {
    #[error("Entry vanished before it could be inspected: {path}")]
    Vanished { path: PathBuf },

    #[error("Cannot stat {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl StatError {
    /// Classify an I/O error from a stat call.
    pub fn from_io(path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::Vanished { path }
        } else {
            Self::Io { path, source }
        }
    }
}

impl PruneErrorCode for StatError {
    fn error_code(&self) -> &'static str {
        error_code::TRANSIENT_STAT_FAILURE
    }

    fn is_fatal(&self) -> bool {
        false
    }
}

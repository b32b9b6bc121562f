//! Archive reader errors.

use std::path::PathBuf;

use super::error_code::{self, PruneErrorCode};

/// Errors that can occur while opening an index archive.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("Corrupt archive {path}: {message}")]
    Corrupt { path: PathBuf, message: String },

    #[error("IO error reading archive {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl PruneErrorCode for ArchiveError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Corrupt { .. } => error_code::CORRUPT_ARCHIVE,
            Self::Io { .. } => error_code::IO_ERROR,
        }
    }
}

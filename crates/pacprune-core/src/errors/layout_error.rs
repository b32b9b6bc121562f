//! Repository layout errors.

use std::path::PathBuf;

use super::error_code::{self, PruneErrorCode};

/// Errors raised when the repository tree does not have the expected shape.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("Expected directory {path} for index {index} does not exist")]
    MissingDirectory { path: PathBuf, index: PathBuf },

    #[error(
        "Scan root {root} is the package directory of {index}; point at the parent tree so shared sources stay referenced"
    )]
    RootIsRepository { root: PathBuf, index: PathBuf },

    #[error("Sources directory {path} for index {index} is the scan root or a package directory")]
    SourcesNotSeparate { path: PathBuf, index: PathBuf },

    #[error("IO error walking {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl PruneErrorCode for LayoutError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => error_code::IO_ERROR,
            _ => error_code::LAYOUT_VIOLATION,
        }
    }
}

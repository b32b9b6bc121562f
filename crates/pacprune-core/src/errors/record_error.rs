//! Index record errors.

use std::path::PathBuf;

use super::error_code::{self, PruneErrorCode};

/// Errors raised while reading `desc` records out of an index archive.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("Record {member} in {archive} is missing required key %{key}%")]
    MissingKey {
        archive: PathBuf,
        member: String,
        key: &'static str,
    },

    #[error("Record {member} in {archive} has an invalid package filename: {filename}")]
    InvalidFilename {
        archive: PathBuf,
        member: String,
        filename: String,
    },

    #[error("Record {member} in {archive} is not valid UTF-8")]
    InvalidEncoding { archive: PathBuf, member: String },
}

impl PruneErrorCode for RecordError {
    fn error_code(&self) -> &'static str {
        error_code::MALFORMED_RECORD
    }
}

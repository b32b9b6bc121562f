//! PruneErrorCode trait for stable, scriptable error codes.

/// Every error enum implements this to expose a stable code string
/// that the CLI prints ahead of the human-readable message.
pub trait PruneErrorCode {
    /// Returns the error code string (e.g., "CORRUPT_ARCHIVE").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }

    /// Fatal errors abort the run before any decision is finalized.
    fn is_fatal(&self) -> bool {
        true
    }
}

pub const CORRUPT_ARCHIVE: &str = "CORRUPT_ARCHIVE";
pub const MALFORMED_RECORD: &str = "MALFORMED_RECORD";
pub const LAYOUT_VIOLATION: &str = "LAYOUT_VIOLATION";
pub const TRANSIENT_STAT_FAILURE: &str = "TRANSIENT_STAT_FAILURE";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const IO_ERROR: &str = "IO_ERROR";

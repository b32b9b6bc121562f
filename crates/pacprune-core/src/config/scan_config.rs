//! Repository scan configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_INDEX_SUFFIX, DEFAULT_SOURCES_DIR, DEFAULT_THREADS};

/// Configuration for the repository scanner.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScanConfig {
    /// File name suffix of repository indices. Default: ".files".
    pub index_suffix: Option<String>,
    /// Name of the sibling source directory. Default: "sources".
    pub sources_dir: Option<String>,
    /// Worker threads for parsing and evaluation (0 = auto). Default: 0.
    pub threads: Option<usize>,
}

impl ScanConfig {
    /// Returns the effective index suffix.
    pub fn effective_index_suffix(&self) -> &str {
        self.index_suffix.as_deref().unwrap_or(DEFAULT_INDEX_SUFFIX)
    }

    /// Returns the effective sources directory name.
    pub fn effective_sources_dir(&self) -> &str {
        self.sources_dir.as_deref().unwrap_or(DEFAULT_SOURCES_DIR)
    }

    /// Returns the effective thread count.
    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or(DEFAULT_THREADS)
    }
}

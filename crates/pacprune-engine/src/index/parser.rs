//! Index archive → protected pattern set.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use pacprune_core::constants::DESC_MEMBER;
use pacprune_core::errors::{ArchiveError, PruneError, RecordError};

use super::desc::PackageRecord;
use crate::archive::IndexArchive;
use crate::fs::FsProvider;
use crate::glob::ProtectedSet;

/// Everything one index archive contributes to a plan.
#[derive(Debug, Clone)]
pub struct IndexPatterns {
    pub index: PathBuf,
    pub modified: DateTime<Utc>,
    pub records: Vec<PackageRecord>,
    /// Baseline plus the package and source pattern of every record. Split
    /// packages built from one base share a source pattern.
    pub patterns: ProtectedSet,
}

impl IndexPatterns {
    /// Open, parse and validate the index archive at `index`.
    ///
    /// Any failure is fatal: a partially read index cannot vouch for what is safe.
    pub fn load(fs: &dyn FsProvider, index: &Path) -> Result<Self, PruneError> {
        let _span = tracing::debug_span!("parse_index", index_path = %index.display()).entered();

        let modified = fs.modified(index).map_err(|e| ArchiveError::Io {
            path: index.to_path_buf(),
            source: std::io::Error::other(e.to_string()),
        })?;
        let archive = IndexArchive::open(fs, index)?;
        let records = read_records(&archive)?;
        let patterns = protected_patterns(&records);

        tracing::info!(
            index_path = %index.display(),
            records = records.len(),
            pattern_count = patterns.len(),
            "parsed index"
        );

        Ok(Self {
            index: index.to_path_buf(),
            modified,
            records,
            patterns,
        })
    }
}

/// Parse every `desc` member of `archive`.
pub fn read_records(archive: &IndexArchive) -> Result<Vec<PackageRecord>, RecordError> {
    archive
        .members()
        .filter(|m| m.base_name() == DESC_MEMBER)
        .map(|member| {
            let text =
                std::str::from_utf8(&member.content).map_err(|_| RecordError::InvalidEncoding {
                    archive: archive.path().to_path_buf(),
                    member: member.name.clone(),
                })?;
            PackageRecord::from_desc(archive.path(), &member.name, text)
        })
        .collect()
}

/// Baseline patterns plus the package and source pattern of every record.
pub fn protected_patterns(records: &[PackageRecord]) -> ProtectedSet {
    let mut patterns = ProtectedSet::baseline();
    for record in records {
        patterns.insert(record.package_pattern());
        patterns.insert(record.source_pattern());
    }
    patterns
}

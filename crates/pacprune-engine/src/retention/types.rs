//! Retention data types.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::glob::ProtectedSet;

/// A directory subject to retention, with every pattern that protects files in it.
#[derive(Debug, Clone, Default)]
pub struct PruneDirectory {
    pub path: PathBuf,
    pub patterns: ProtectedSet,
}

/// A listed file with its modification time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    pub modified: DateTime<Utc>,
}

/// A file selected for deletion.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Candidate {
    pub path: PathBuf,
    pub modified: DateTime<Utc>,
}

/// Counters for one directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DirectoryStats {
    pub entries: usize,
    pub protected: usize,
    pub groups: usize,
    pub deletable: usize,
}

/// The engine's verdict for one directory.
#[derive(Debug, Clone, Default)]
pub struct DirectoryDecision {
    pub path: PathBuf,
    /// Sorted by path.
    pub deletable: Vec<Candidate>,
    pub stats: DirectoryStats,
}

/// Counters for a whole plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlanStats {
    pub indices: usize,
    pub records: usize,
    pub directories: usize,
    pub entries: usize,
    pub protected: usize,
    pub groups: usize,
    pub deletable: usize,
}

impl PlanStats {
    pub fn absorb(&mut self, dir: &DirectoryStats) {
        self.entries += dir.entries;
        self.protected += dir.protected;
        self.groups += dir.groups;
    }
}

/// The global set of paths slated for deletion. Immutable once built.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RetentionDecision {
    /// `None` when no index was found.
    pub cutoff: Option<DateTime<Utc>>,
    pub window_days: i64,
    /// Sorted by path, no duplicates.
    pub candidates: Vec<Candidate>,
    pub stats: PlanStats,
}

impl RetentionDecision {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn paths(&self) -> impl Iterator<Item = &std::path::Path> {
        self.candidates.iter().map(|c| c.path.as_path())
    }
}

//! # pacprune-engine
//!
//! Read-only retention planning for package repository mirrors:
//! - Archive: zstd-or-plain tar reader for index archives
//! - Index: `desc` record parsing into protected filename patterns
//! - Glob: `*`-only filename matcher and protected pattern sets
//! - Scanner: index discovery and package/sources directory resolution
//! - Retention: package grouping and the age/quorum policy
//! - Planner: folds everything into one `RetentionDecision`
//!
//! Nothing in this crate removes files.

pub mod archive;
pub mod fs;
pub mod glob;
pub mod index;
pub mod planner;
pub mod retention;
pub mod scanner;

pub use archive::{ArchiveMember, IndexArchive};
pub use fs::{FsProvider, OsFs};
pub use glob::{GlobPattern, ProtectedSet};
pub use index::{IndexPatterns, PackageRecord};
pub use planner::{Planner, PlannerOptions};
pub use retention::{
    Candidate, DirectoryDecision, PackageKey, PlanStats, PruneDirectory, RetentionDecision,
    RetentionEngine, RetentionPolicy,
};
pub use scanner::{RepositoryLayout, RepositoryScanner};

//! Retention subsystem: package grouping, the age/quorum policy, and the
//! per-directory engine that turns both into deletion candidates.

pub mod engine;
pub mod grouping;
pub mod policy;
pub mod types;

pub use engine::RetentionEngine;
pub use grouping::{group_entries, normalize_extension, package_key, PackageKey};
pub use policy::RetentionPolicy;
pub use types::{
    Candidate, DirectoryDecision, DirectoryStats, Entry, PlanStats, PruneDirectory,
    RetentionDecision,
};

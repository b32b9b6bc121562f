//! Scanner subsystem: index discovery and repository layout resolution.
//!
//! The scanner is the entry point of a plan. It finds every index under the
//! root and pairs each with its package directory and shared sources directory.

pub mod discovery;
pub mod layout;
pub mod scanner;

pub use discovery::discover_indices;
pub use layout::{resolve_layout, RepositoryLayout};
pub use scanner::RepositoryScanner;

//! Index archive reading: transparent zstd detection over a tar container.

pub mod reader;

pub use reader::{ArchiveMember, IndexArchive};

//! Index parsing: `desc` records to protected filename patterns.

pub mod desc;
pub mod filename;
pub mod parser;

pub use desc::{parse_fields, PackageRecord};
pub use filename::is_package_filename;
pub use parser::{protected_patterns, read_records, IndexPatterns};

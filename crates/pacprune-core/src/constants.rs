//! Shared constants for pacprune.

/// File name suffix that marks a repository index (e.g. `mingw64.files`).
pub const DEFAULT_INDEX_SUFFIX: &str = ".files";

/// Name of the shared source-archive directory, one level above a package directory.
pub const DEFAULT_SOURCES_DIR: &str = "sources";

/// Base name of the metadata member inside an index archive.
pub const DESC_MEMBER: &str = "desc";

/// Patterns that are protected in every prune directory: the index files
/// themselves and their compressed/signed companions.
pub const BASELINE_PATTERNS: [&str; 4] = ["*.db*", "*.files*", "*.db", "*.files"];

/// Compression suffixes ignored when grouping artifacts.
pub const COMPRESSION_SUFFIXES: [&str; 3] = ["xz", "zst", "gz"];

/// Extension prefix of source packages (`name-version.src.tar.zst`).
pub const SOURCE_MARKER: &str = ".src";

/// Extension prefix of binary packages (`name-version-rel-arch.pkg.tar.zst`).
pub const PACKAGE_MARKER: &str = ".pkg";

/// Hyphen components dropped from a binary package name: version, release, arch.
pub const PACKAGE_NAME_DEPTH: usize = 3;

/// Hyphen components dropped from a source package name: version, release.
pub const SOURCE_NAME_DEPTH: usize = 2;

/// A group whose newest entry is older than `cutoff - GRACE * window` is abandoned.
pub const DEFAULT_GRACE_MULTIPLIER: u32 = 4;

/// Default number of worker threads (0 = rayon decides).
pub const DEFAULT_THREADS: usize = 0;

/// Magic bytes opening a zstd frame.
pub const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// Project-level config file name.
pub const PROJECT_CONFIG_FILE: &str = "pacprune.toml";

/// Environment variable read by the tracing filter.
pub const LOG_ENV_VAR: &str = "PACPRUNE_LOG";

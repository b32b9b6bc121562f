//! Filesystem access used by the scanner and the retention engine.
//!
//! The engine only ever reads through this trait, so tests can inject
//! failures without racing a real filesystem.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use pacprune_core::errors::{LayoutError, StatError};
use walkdir::WalkDir;

/// Read-only filesystem operations.
pub trait FsProvider: Send + Sync {
    /// Recursively list every non-directory entry (files and symlinks) under `root`.
    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>, LayoutError>;

    /// List the bare names of non-directory entries directly inside `dir`.
    /// Symlinks to directories and names that are not UTF-8 are left out.
    fn list_dir(&self, dir: &Path) -> Result<Vec<String>, LayoutError>;

    /// Resolve symlinks and return an absolute path.
    fn canonicalize(&self, path: &Path) -> std::io::Result<PathBuf>;

    /// Modification time, following symlinks.
    fn modified(&self, path: &Path) -> Result<DateTime<Utc>, StatError>;

    /// File size in bytes, following symlinks.
    fn size(&self, path: &Path) -> Result<u64, StatError>;

    /// Whether `path` exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Read a whole file.
    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>>;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl FsProvider for OsFs {
    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>, LayoutError> {
        let mut files = Vec::new();
        for entry in WalkDir::new(root).follow_links(false) {
            // An unreadable subtree could hide an index that still references
            // shared sources, so walk errors are fatal.
            let entry = entry.map_err(|e| LayoutError::Io {
                path: e.path().unwrap_or(root).to_path_buf(),
                source: e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("filesystem loop")),
            })?;
            if !entry.file_type().is_dir() {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    fn list_dir(&self, dir: &Path) -> Result<Vec<String>, LayoutError> {
        let io_err = |source| LayoutError::Io {
            path: dir.to_path_buf(),
            source,
        };
        let mut names = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            let file_type = entry.file_type().map_err(io_err)?;
            if file_type.is_dir() {
                continue;
            }
            // Symlinks to directories are not files either. A dangling link
            // stays listed and fails its later stat.
            if file_type.is_symlink()
                && std::fs::metadata(entry.path()).is_ok_and(|m| m.is_dir())
            {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => {
                    tracing::warn!(
                        dir = %dir.display(),
                        name = ?raw,
                        "skipping entry with a non-UTF-8 name"
                    );
                }
            }
        }
        Ok(names)
    }

    fn canonicalize(&self, path: &Path) -> std::io::Result<PathBuf> {
        std::fs::canonicalize(path)
    }

    fn modified(&self, path: &Path) -> Result<DateTime<Utc>, StatError> {
        let stat_err = |e| StatError::from_io(path.to_path_buf(), e);
        let mtime = std::fs::metadata(path)
            .and_then(|m| m.modified())
            .map_err(stat_err)?;
        Ok(DateTime::<Utc>::from(mtime))
    }

    fn size(&self, path: &Path) -> Result<u64, StatError> {
        std::fs::metadata(path)
            .map(|m| m.len())
            .map_err(|e| StatError::from_io(path.to_path_buf(), e))
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

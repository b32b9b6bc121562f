//! Package / sources directory pairing.

use std::path::{Path, PathBuf};

use pacprune_core::errors::LayoutError;

use crate::fs::FsProvider;

/// The directories one index governs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct RepositoryLayout {
    pub index: PathBuf,
    /// Directory holding the index and its binary packages.
    pub package_dir: PathBuf,
    /// `<package_dir>/../<sources>`, canonicalized. Shared between channels.
    pub sources_dir: PathBuf,
}

/// Derive the layout of `index` (already canonical) under the canonical `root`.
pub fn resolve_layout(
    fs: &dyn FsProvider,
    root: &Path,
    index: &Path,
    sources_name: &str,
) -> Result<RepositoryLayout, LayoutError> {
    let package_dir = index
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| LayoutError::MissingDirectory {
            path: index.to_path_buf(),
            index: index.to_path_buf(),
        })?;

    if package_dir == root {
        return Err(LayoutError::RootIsRepository {
            root: root.to_path_buf(),
            index: index.to_path_buf(),
        });
    }
    if !fs.is_dir(&package_dir) {
        return Err(LayoutError::MissingDirectory {
            path: package_dir,
            index: index.to_path_buf(),
        });
    }

    let sources = package_dir.join("..").join(sources_name);
    if !fs.is_dir(&sources) {
        return Err(LayoutError::MissingDirectory {
            path: sources,
            index: index.to_path_buf(),
        });
    }
    let sources_dir = fs.canonicalize(&sources).map_err(|source| LayoutError::Io {
        path: sources.clone(),
        source,
    })?;

    if sources_dir == root || sources_dir == package_dir {
        return Err(LayoutError::SourcesNotSeparate {
            path: sources_dir,
            index: index.to_path_buf(),
        });
    }

    Ok(RepositoryLayout {
        index: index.to_path_buf(),
        package_dir,
        sources_dir,
    })
}

//! Index file discovery.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use pacprune_core::errors::LayoutError;

use crate::fs::FsProvider;

/// Every file under `root` whose name ends with `suffix`, symlinks resolved.
///
/// A channel usually ships `repo.files` as a symlink to `repo.files.tar.zst`;
/// both resolve to the same archive and are reported once.
pub fn discover_indices(
    fs: &dyn FsProvider,
    root: &Path,
    suffix: &str,
) -> Result<BTreeSet<PathBuf>, LayoutError> {
    let mut indices = BTreeSet::new();
    for path in fs.walk_files(root)? {
        let matches_suffix = path
            .file_name()
            .map(|name| name.to_string_lossy().ends_with(suffix))
            .unwrap_or(false);
        if !matches_suffix {
            continue;
        }
        let real = fs.canonicalize(&path).map_err(|source| LayoutError::Io {
            path: path.clone(),
            source,
        })?;
        indices.insert(real);
    }
    Ok(indices)
}

//! Repository scanner: discovery + layout for a whole tree.

use std::path::{Path, PathBuf};
use std::time::Instant;

use pacprune_core::errors::LayoutError;

use super::discovery::discover_indices;
use super::layout::{resolve_layout, RepositoryLayout};
use crate::fs::FsProvider;

/// Finds every repository under a root.
pub struct RepositoryScanner<'a> {
    fs: &'a dyn FsProvider,
    index_suffix: String,
    sources_dir: String,
}

impl<'a> RepositoryScanner<'a> {
    pub fn new(fs: &'a dyn FsProvider, index_suffix: &str, sources_dir: &str) -> Self {
        Self {
            fs,
            index_suffix: index_suffix.to_string(),
            sources_dir: sources_dir.to_string(),
        }
    }

    /// Canonicalize `root`, discover its indices and resolve their layouts.
    ///
    /// Layouts come back sorted by index path. Every index is checked before
    /// anything is returned, so one bad repository fails the whole scan.
    pub fn scan(&self, root: &Path) -> Result<(PathBuf, Vec<RepositoryLayout>), LayoutError> {
        let start = Instant::now();
        let root = self.fs.canonicalize(root).map_err(|source| LayoutError::Io {
            path: root.to_path_buf(),
            source,
        })?;

        let indices = discover_indices(self.fs, &root, &self.index_suffix)?;
        tracing::debug!(
            root = %root.display(),
            indices = indices.len(),
            discovery_duration = start.elapsed().as_millis() as u64,
            "discovered indices"
        );

        if let Some(index) = indices.iter().find(|i| i.parent() == Some(root.as_path())) {
            return Err(LayoutError::RootIsRepository {
                root,
                index: index.clone(),
            });
        }

        let layouts = indices
            .iter()
            .map(|index| resolve_layout(self.fs, &root, index, &self.sources_dir))
            .collect::<Result<Vec<_>, _>>()?;

        Ok((root, layouts))
    }
}

//! Per-directory retention evaluation.

use pacprune_core::errors::{LayoutError, PlanResult};

use super::grouping::group_entries;
use super::policy::RetentionPolicy;
use super::types::{Candidate, DirectoryDecision, DirectoryStats, Entry, PruneDirectory};
use crate::fs::FsProvider;

/// Applies one policy to directories read through an `FsProvider`.
pub struct RetentionEngine<'a> {
    fs: &'a dyn FsProvider,
    policy: RetentionPolicy,
}

impl<'a> RetentionEngine<'a> {
    pub fn new(fs: &'a dyn FsProvider, policy: RetentionPolicy) -> Self {
        Self { fs, policy }
    }

    /// Decide which entries of `dir` may be deleted.
    ///
    /// A listing failure is fatal. An entry whose mtime cannot be read is
    /// skipped and reported in `errors`; it is never deleted.
    pub fn evaluate(&self, dir: &PruneDirectory) -> Result<PlanResult<DirectoryDecision>, LayoutError> {
        let _span = tracing::debug_span!("evaluate_directory", prune_dir = %dir.path.display())
            .entered();

        let mut result = PlanResult::<DirectoryDecision>::default();
        let mut entries = Vec::new();
        for name in self.fs.list_dir(&dir.path)? {
            let path = dir.path.join(&name);
            match self.fs.modified(&path) {
                Ok(modified) => entries.push(Entry {
                    name,
                    path,
                    modified,
                }),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping entry");
                    result.add_error(e);
                }
            }
        }

        let mut stats = DirectoryStats {
            entries: entries.len(),
            ..DirectoryStats::default()
        };
        let groups = group_entries(entries);
        stats.groups = groups.len();

        let mut deletable = Vec::new();
        for group in groups.into_values() {
            let times: Vec<_> = group.iter().map(|e| e.modified).collect();
            let prefix = self.policy.deletable_prefix(&times);

            for (i, entry) in group.into_iter().enumerate() {
                // Protected entries still count toward their group's ordering.
                if dir.patterns.is_protected(&entry.name) {
                    stats.protected += 1;
                    continue;
                }
                if i < prefix {
                    deletable.push(Candidate {
                        path: entry.path,
                        modified: entry.modified,
                    });
                }
            }
        }
        deletable.sort();
        stats.deletable = deletable.len();

        tracing::debug!(
            prune_dir = %dir.path.display(),
            group_count = stats.groups,
            deletable_count = stats.deletable,
            "evaluated directory"
        );

        result.data = DirectoryDecision {
            path: dir.path.clone(),
            deletable,
            stats,
        };
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};

    use chrono::{DateTime, Duration, Utc};
    use pacprune_core::errors::StatError;

    use super::*;
    use crate::glob::ProtectedSet;

    /// In-memory directory: name → mtime, or `None` for an entry that vanishes.
    struct MemFs {
        files: BTreeMap<PathBuf, Option<DateTime<Utc>>>,
    }

    impl FsProvider for MemFs {
        fn walk_files(&self, _root: &Path) -> Result<Vec<PathBuf>, LayoutError> {
            Ok(self.files.keys().cloned().collect())
        }

        fn list_dir(&self, dir: &Path) -> Result<Vec<String>, LayoutError> {
            Ok(self
                .files
                .keys()
                .filter(|p| p.parent() == Some(dir))
                .filter_map(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .collect())
        }

        fn canonicalize(&self, path: &Path) -> std::io::Result<PathBuf> {
            Ok(path.to_path_buf())
        }

        fn modified(&self, path: &Path) -> Result<DateTime<Utc>, StatError> {
            match self.files.get(path) {
                Some(Some(t)) => Ok(*t),
                _ => Err(StatError::Vanished {
                    path: path.to_path_buf(),
                }),
            }
        }

        fn size(&self, _path: &Path) -> Result<u64, StatError> {
            Ok(0)
        }

        fn is_dir(&self, _path: &Path) -> bool {
            true
        }

        fn read(&self, _path: &Path) -> std::io::Result<Vec<u8>> {
            Ok(Vec::new())
        }
    }

    fn day(n: i64) -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH + Duration::days(n)
    }

    fn mem(files: &[(&str, Option<i64>)]) -> MemFs {
        MemFs {
            files: files
                .iter()
                .map(|(name, d)| (Path::new("/repo/x86_64").join(name), d.map(day)))
                .collect(),
        }
    }

    fn dir(patterns: &[&str]) -> PruneDirectory {
        let mut set = ProtectedSet::new();
        for p in patterns {
            set.insert(*p);
        }
        PruneDirectory {
            path: PathBuf::from("/repo/x86_64"),
            patterns: set,
        }
    }

    fn policy() -> RetentionPolicy {
        RetentionPolicy::new(day(400), Duration::days(365), 4)
    }

    fn names(decision: &DirectoryDecision) -> Vec<String> {
        decision
            .deletable
            .iter()
            .filter_map(|c| c.path.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn keeps_two_old_builds_before_current() {
        let fs = mem(&[
            ("foo-1.0-1-any.pkg.tar.zst", Some(0)),
            ("foo-1.1-1-any.pkg.tar.zst", Some(10)),
            ("foo-1.2-1-any.pkg.tar.zst", Some(400)),
        ]);
        let engine = RetentionEngine::new(&fs, policy());
        let result = engine.evaluate(&dir(&["foo-1.2-1-any.pkg.tar.zst*"])).unwrap();
        assert!(result.data.deletable.is_empty());
        assert_eq!(result.data.stats.groups, 1);
        assert_eq!(result.data.stats.protected, 1);
    }

    #[test]
    fn deletes_beyond_two_old_builds() {
        let fs = mem(&[
            ("foo-0.9-1-any.pkg.tar.zst", Some(0)),
            ("foo-1.0-1-any.pkg.tar.zst", Some(5)),
            ("foo-1.1-1-any.pkg.tar.zst", Some(10)),
            ("foo-1.2-1-any.pkg.tar.zst", Some(400)),
        ]);
        let engine = RetentionEngine::new(&fs, policy());
        let result = engine.evaluate(&dir(&[])).unwrap();
        assert_eq!(names(&result.data), vec!["foo-0.9-1-any.pkg.tar.zst"]);
    }

    #[test]
    fn protected_entries_are_never_candidates() {
        let fs = mem(&[
            ("foo-0.9-1-any.pkg.tar.zst", Some(0)),
            ("foo-1.0-1-any.pkg.tar.zst", Some(5)),
            ("foo-1.1-1-any.pkg.tar.zst", Some(10)),
            ("foo-1.2-1-any.pkg.tar.zst", Some(400)),
        ]);
        let engine = RetentionEngine::new(&fs, policy());
        let result = engine.evaluate(&dir(&["foo-0.9-1-any.pkg.tar.zst*"])).unwrap();
        assert!(result.data.deletable.is_empty());
    }

    #[test]
    fn vanished_entry_is_reported_and_kept() {
        let fs = mem(&[
            ("foo-0.9-1-any.pkg.tar.zst", None),
            ("foo-1.0-1-any.pkg.tar.zst", Some(5)),
            ("foo-1.2-1-any.pkg.tar.zst", Some(400)),
        ]);
        let engine = RetentionEngine::new(&fs, policy());
        let result = engine.evaluate(&dir(&[])).unwrap();
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.data.stats.entries, 2);
        assert!(result.data.deletable.is_empty());
    }

    #[test]
    fn groups_are_independent() {
        let fs = mem(&[
            ("foo-0.9-1-any.pkg.tar.zst", Some(0)),
            ("foo-1.0-1-any.pkg.tar.zst", Some(5)),
            ("foo-1.1-1-any.pkg.tar.zst", Some(10)),
            ("foo-1.2-1-any.pkg.tar.zst", Some(400)),
            ("bar-1.0-1-any.pkg.tar.zst", Some(0)),
            ("bar-1.1-1-any.pkg.tar.zst", Some(300)),
        ]);
        let engine = RetentionEngine::new(&fs, policy());
        let result = engine.evaluate(&dir(&[])).unwrap();
        assert_eq!(result.data.stats.groups, 2);
        assert_eq!(names(&result.data), vec!["foo-0.9-1-any.pkg.tar.zst"]);
    }
}

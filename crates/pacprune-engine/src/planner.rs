//! Whole-tree planning: scan, parse, fold patterns per directory, evaluate.
//!
//! Every fatal error surfaces before a decision exists, so a caller never
//! sees a partial plan.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Duration;
use pacprune_core::config::PruneConfig;
use pacprune_core::errors::{ConfigError, LayoutError, PlanResult, PruneError};
use pacprune_core::types::FxHashMap;
use rayon::prelude::*;

use crate::fs::FsProvider;
use crate::glob::ProtectedSet;
use crate::index::IndexPatterns;
use crate::retention::{
    Candidate, DirectoryDecision, PlanStats, PruneDirectory, RetentionDecision, RetentionEngine,
    RetentionPolicy,
};
use crate::scanner::{RepositoryLayout, RepositoryScanner};

/// Resolved planning parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerOptions {
    pub window: Duration,
    pub grace_multiplier: u32,
    pub index_suffix: String,
    pub sources_dir: String,
    /// 0 uses rayon's global pool.
    pub threads: usize,
}

impl PlannerOptions {
    pub fn from_config(config: &PruneConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            window: config.retention.effective_window()?,
            grace_multiplier: config.retention.effective_grace_multiplier(),
            index_suffix: config.scan.effective_index_suffix().to_string(),
            sources_dir: config.scan.effective_sources_dir().to_string(),
            threads: config.scan.effective_threads(),
        })
    }
}

/// Computes a `RetentionDecision` for a repository tree.
pub struct Planner<F: FsProvider> {
    fs: F,
    options: PlannerOptions,
}

impl<F: FsProvider> Planner<F> {
    pub fn new(fs: F, options: PlannerOptions) -> Self {
        Self { fs, options }
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// Plan the deletions for `root`. Read-only.
    ///
    /// Stat failures on individual entries are collected in `errors` and the
    /// affected entries are kept.
    pub fn plan(&self, root: &Path) -> Result<PlanResult<RetentionDecision>, PruneError> {
        let start = Instant::now();
        let _span = tracing::info_span!("plan", root = %root.display()).entered();

        let scanner = RepositoryScanner::new(
            &self.fs,
            &self.options.index_suffix,
            &self.options.sources_dir,
        );
        let (root, layouts) = scanner.scan(root)?;

        let window_days = self.options.window.num_days();
        if layouts.is_empty() {
            tracing::info!(root = %root.display(), "no indices found, nothing to plan");
            return Ok(PlanResult::new(RetentionDecision {
                window_days,
                ..RetentionDecision::default()
            }));
        }

        let result = self.in_pool(|| self.plan_layouts(&layouts))?;

        tracing::info!(
            root = %root.display(),
            indices = result.data.stats.indices,
            directories = result.data.stats.directories,
            deletable_count = result.data.stats.deletable,
            stat_failures = result.error_count(),
            duration_ms = start.elapsed().as_millis() as u64,
            "plan complete"
        );
        Ok(result)
    }

    fn plan_layouts(
        &self,
        layouts: &[RepositoryLayout],
    ) -> Result<PlanResult<RetentionDecision>, PruneError> {
        let fs: &dyn FsProvider = &self.fs;

        let parsed = layouts
            .par_iter()
            .map(|layout| IndexPatterns::load(fs, &layout.index))
            .collect::<Result<Vec<_>, _>>()?;

        let Some(newest) = parsed.iter().map(|p| p.modified).max() else {
            return Ok(PlanResult::new(RetentionDecision::default()));
        };
        let policy = RetentionPolicy::new(
            newest,
            self.options.window,
            self.options.grace_multiplier,
        );
        tracing::debug!(cutoff = %policy.cutoff, "retention cutoff");

        let directories = prune_directories(layouts, &parsed);
        let engine = RetentionEngine::new(fs, policy);
        let decisions = directories
            .par_iter()
            .map(|dir| engine.evaluate(dir))
            .collect::<Result<Vec<_>, LayoutError>>()?;

        let mut stats = PlanStats {
            indices: parsed.len(),
            records: parsed.iter().map(|p| p.records.len()).sum(),
            directories: directories.len(),
            ..PlanStats::default()
        };
        let mut result = PlanResult::<RetentionDecision>::default();
        let mut candidates: BTreeMap<PathBuf, Candidate> = BTreeMap::new();
        for decision in decisions {
            result.extend_errors(decision.errors);
            let DirectoryDecision {
                deletable, stats: dir_stats, ..
            } = decision.data;
            stats.absorb(&dir_stats);
            for candidate in deletable {
                candidates.insert(candidate.path.clone(), candidate);
            }
        }
        stats.deletable = candidates.len();

        result.data = RetentionDecision {
            cutoff: Some(policy.cutoff),
            window_days: self.options.window.num_days(),
            candidates: candidates.into_values().collect(),
            stats,
        };
        Ok(result)
    }

    fn in_pool<T: Send>(&self, op: impl FnOnce() -> T + Send) -> T {
        if self.options.threads == 0 {
            return op();
        }
        match rayon::ThreadPoolBuilder::new()
            .num_threads(self.options.threads)
            .build()
        {
            Ok(pool) => pool.install(op),
            Err(e) => {
                tracing::warn!(error = %e, "falling back to the global thread pool");
                op()
            }
        }
    }
}

/// Union each index's patterns into its package directory and its sources
/// directory. Sorted by path.
fn prune_directories(layouts: &[RepositoryLayout], parsed: &[IndexPatterns]) -> Vec<PruneDirectory> {
    let mut by_dir: FxHashMap<PathBuf, ProtectedSet> = FxHashMap::default();
    for (layout, index) in layouts.iter().zip(parsed) {
        for dir in [&layout.package_dir, &layout.sources_dir] {
            by_dir.entry(dir.clone()).or_default().merge(&index.patterns);
        }
    }
    let mut directories: Vec<PruneDirectory> = by_dir
        .into_iter()
        .map(|(path, patterns)| PruneDirectory { path, patterns })
        .collect();
    directories.sort_by(|a, b| a.path.cmp(&b.path));
    directories
}

//! Plan presentation and removal.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use pacprune_core::errors::PlanResult;
use pacprune_engine::{FsProvider, PlanStats, RetentionDecision};
use serde::Serialize;

/// One path slated for deletion.
#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    pub path: PathBuf,
    pub modified: DateTime<Utc>,
    /// `None` when the size could not be read.
    pub size: Option<u64>,
}

/// A plan as shown to the operator.
#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub root: PathBuf,
    pub cutoff: Option<DateTime<Utc>>,
    pub window_days: i64,
    pub entries: Vec<ReportEntry>,
    pub total_bytes: u64,
    /// Entries skipped because their metadata could not be read.
    pub stat_failures: usize,
    pub stats: PlanStats,
}

impl PlanReport {
    /// Attach sizes to every candidate of `result`.
    pub fn build(fs: &dyn FsProvider, root: &Path, result: &PlanResult<RetentionDecision>) -> Self {
        let mut stat_failures = result.error_count();
        let entries: Vec<ReportEntry> = result
            .data
            .candidates
            .iter()
            .map(|candidate| {
                let size = match fs.size(&candidate.path) {
                    Ok(size) => Some(size),
                    Err(e) => {
                        tracing::warn!(error = %e, "cannot read size");
                        stat_failures += 1;
                        None
                    }
                };
                ReportEntry {
                    path: candidate.path.clone(),
                    modified: candidate.modified,
                    size,
                }
            })
            .collect();
        let total_bytes = entries.iter().filter_map(|e| e.size).sum();

        Self {
            root: root.to_path_buf(),
            cutoff: result.data.cutoff,
            window_days: result.data.window_days,
            entries,
            total_bytes,
            stat_failures,
            stats: result.data.stats,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn write_text(&self, out: &mut impl Write) -> io::Result<()> {
        match self.cutoff {
            Some(cutoff) => writeln!(
                out,
                "Cutoff: {} ({} day window)",
                rfc3339(cutoff),
                self.window_days
            )?,
            None => writeln!(out, "No indices found under {}", self.root.display())?,
        }
        writeln!(
            out,
            "Scanned {} indices, {} directories, {} files ({} protected, {} groups)",
            self.stats.indices,
            self.stats.directories,
            self.stats.entries,
            self.stats.protected,
            self.stats.groups
        )?;

        if self.entries.is_empty() {
            writeln!(out, "Nothing to delete")?;
        } else {
            writeln!(out)?;
            for entry in &self.entries {
                let size = entry.size.map_or_else(|| "?".to_string(), format_bytes);
                writeln!(
                    out,
                    "  {}  {:>10}  {}",
                    rfc3339(entry.modified),
                    size,
                    entry.path.display()
                )?;
            }
            writeln!(out)?;
            writeln!(
                out,
                "{} files, {} reclaimable",
                self.entries.len(),
                format_bytes(self.total_bytes)
            )?;
        }

        if self.stat_failures > 0 {
            writeln!(
                out,
                "warning: {} entries could not be inspected and were kept",
                self.stat_failures
            )?;
        }
        Ok(())
    }

    pub fn write_json(&self, out: &mut impl Write) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)
    }
}

/// Outcome of removing a plan's files.
#[derive(Debug, Default)]
pub struct RemovalSummary {
    pub removed: usize,
    pub bytes: u64,
    pub failures: Vec<(PathBuf, io::Error)>,
}

impl RemovalSummary {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Remove every entry, carrying on past individual failures.
pub fn remove_entries(entries: &[ReportEntry]) -> RemovalSummary {
    let mut summary = RemovalSummary::default();
    for entry in entries {
        match std::fs::remove_file(&entry.path) {
            Ok(()) => {
                tracing::debug!(path = %entry.path.display(), "removed");
                summary.removed += 1;
                summary.bytes += entry.size.unwrap_or(0);
            }
            Err(e) => {
                tracing::error!(path = %entry.path.display(), error = %e, "removal failed");
                summary.failures.push((entry.path.clone(), e));
            }
        }
    }
    summary
}

fn rfc3339(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Binary-prefixed size, one decimal.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_are_humanized() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1536), "1.5 KiB");
        assert_eq!(format_bytes(5 * 1024 * 1024 * 1024), "5.0 GiB");
    }

    #[test]
    fn removal_continues_past_failures() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("a.pkg.tar.zst");
        std::fs::write(&present, b"1234").unwrap();
        let entries = vec![
            ReportEntry {
                path: dir.path().join("gone.pkg.tar.zst"),
                modified: DateTime::<Utc>::UNIX_EPOCH,
                size: Some(10),
            },
            ReportEntry {
                path: present.clone(),
                modified: DateTime::<Utc>::UNIX_EPOCH,
                size: Some(4),
            },
        ];

        let summary = remove_entries(&entries);
        assert_eq!(summary.removed, 1);
        assert_eq!(summary.bytes, 4);
        assert_eq!(summary.failures.len(), 1);
        assert!(!present.exists());
    }

    #[test]
    fn empty_report_says_so() {
        let report = PlanReport {
            root: PathBuf::from("/srv/repo"),
            cutoff: None,
            window_days: 30,
            entries: Vec::new(),
            total_bytes: 0,
            stat_failures: 0,
            stats: PlanStats::default(),
        };
        let mut out = Vec::new();
        report.write_text(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("No indices found under /srv/repo"));
        assert!(text.contains("Nothing to delete"));
    }
}

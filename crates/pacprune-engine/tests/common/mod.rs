//! On-disk repository fixtures: index archives built with tar + zstd and
//! mtimes pinned with filetime.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use filetime::FileTime;
use pacprune_engine::PlannerOptions;
use tempfile::TempDir;

/// Day 0 of every fixture clock.
pub const EPOCH_SECS: i64 = 1_600_000_000;

pub fn day(n: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(EPOCH_SECS, 0).unwrap() + Duration::days(n)
}

pub fn options(window_days: i64) -> PlannerOptions {
    PlannerOptions {
        window: Duration::days(window_days),
        grace_multiplier: 4,
        index_suffix: ".files".to_string(),
        sources_dir: "sources".to_string(),
        threads: 0,
    }
}

/// One `desc` entry of an index.
#[derive(Debug, Clone)]
pub struct Desc {
    pub name: String,
    pub version: String,
    pub filename: String,
}

impl Desc {
    /// `name-version-any.pkg.tar.zst`; `version` includes the release.
    pub fn new(name: &str, version: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            filename: format!("{name}-{version}-any.pkg.tar.zst"),
        }
    }

    pub fn text(&self) -> String {
        format!(
            "%FILENAME%\n{}\n\n%NAME%\n{}\n\n%BASE%\n{}\n\n%VERSION%\n{}\n\n",
            self.filename, self.name, self.name, self.version
        )
    }
}

/// Build a tar of `(member, content)` pairs, optionally zstd-compressed.
pub fn tar_bytes(members: &[(String, String)], compressed: bool) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    for (name, content) in members {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, name, content.as_bytes())
            .unwrap();
    }
    let bytes = builder.into_inner().unwrap();
    if compressed {
        zstd::encode_all(&bytes[..], 0).unwrap()
    } else {
        bytes
    }
}

pub fn index_bytes(records: &[Desc], compressed: bool) -> Vec<u8> {
    let members: Vec<(String, String)> = records
        .iter()
        .flat_map(|d| {
            let dir = format!("{}-{}", d.name, d.version);
            [
                (format!("{dir}/desc"), d.text()),
                (format!("{dir}/files"), "%FILES%\nusr/\n".to_string()),
            ]
        })
        .collect();
    tar_bytes(&members, compressed)
}

/// A repository tree rooted in a temp directory.
pub struct Repo {
    dir: TempDir,
}

impl Repo {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Create (if needed) a directory directly under the root.
    pub fn dir(&self, name: &str) -> PathBuf {
        let path = self.root().join(name);
        fs::create_dir_all(&path).unwrap();
        path
    }

    pub fn sources(&self) -> PathBuf {
        self.dir("sources")
    }

    /// Write `<channel>/<channel>.files` listing `records`, stamped at `at`.
    pub fn index(&self, channel: &str, records: &[Desc], at: i64) -> PathBuf {
        let path = self.dir(channel).join(format!("{channel}.files"));
        self.write(&path, &index_bytes(records, true), at);
        path
    }

    /// Create an empty file `name` in `dir`, stamped at `at`.
    pub fn touch(&self, dir: &Path, name: &str, at: i64) -> PathBuf {
        let path = dir.join(name);
        self.write(&path, b"", at);
        path
    }

    pub fn write(&self, path: &Path, bytes: &[u8], at: i64) {
        fs::write(path, bytes).unwrap();
        let secs = day(at).timestamp();
        filetime::set_file_mtime(path, FileTime::from_unix_time(secs, 0)).unwrap();
    }
}

/// Bare file names of a decision's candidates, sorted.
pub fn candidate_names(decision: &pacprune_engine::RetentionDecision) -> Vec<String> {
    let mut names: Vec<String> = decision
        .paths()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

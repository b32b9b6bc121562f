//! `desc` record parsing.
//!
//! A record is a sequence of sections: a `%KEY%` line followed by one or more
//! value lines, sections separated by blank lines. Only the first value of a
//! section is kept.

use std::collections::BTreeMap;
use std::path::Path;

use pacprune_core::constants::SOURCE_MARKER;
use pacprune_core::errors::RecordError;

use super::filename::is_package_filename;

/// The fields of one published package that decide what stays on disk.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct PackageRecord {
    pub filename: String,
    /// `%BASE%` when present, `%NAME%` otherwise.
    pub base: String,
    pub version: String,
}

impl PackageRecord {
    /// Parse and validate one `desc` member.
    ///
    /// `archive` and `member` only feed error messages.
    pub fn from_desc(archive: &Path, member: &str, text: &str) -> Result<Self, RecordError> {
        let mut fields = parse_fields(text);
        let mut take = |key: &'static str| fields.remove(key);

        let missing = |key| RecordError::MissingKey {
            archive: archive.to_path_buf(),
            member: member.to_string(),
            key,
        };

        let filename = take("FILENAME").ok_or_else(|| missing("FILENAME"))?;
        let base = match take("BASE") {
            Some(base) => base,
            None => take("NAME").ok_or_else(|| missing("NAME"))?,
        };
        let version = take("VERSION").ok_or_else(|| missing("VERSION"))?;

        if !is_package_filename(&filename) {
            return Err(RecordError::InvalidFilename {
                archive: archive.to_path_buf(),
                member: member.to_string(),
                filename,
            });
        }

        Ok(Self {
            filename,
            base,
            version,
        })
    }

    /// The published file itself plus any side-file sharing its name as a prefix.
    pub fn package_pattern(&self) -> String {
        format!("{}*", self.filename)
    }

    /// Every compression/signature of the matching source archive.
    pub fn source_pattern(&self) -> String {
        format!("{}-{}{}.tar*", self.base, self.version, SOURCE_MARKER)
    }
}

/// Scan `%KEY%` / value line pairs into a map.
///
/// A key line with no value line after it (blank, end of input, or another
/// key) records nothing. Repeated keys keep their first value.
pub fn parse_fields(text: &str) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();
    let mut lines = text.lines().map(|l| l.trim_end_matches('\r')).peekable();

    while let Some(line) = lines.next() {
        let Some(key) = section_key(line) else {
            continue;
        };
        if let Some(value) = lines.next_if(|v| !v.is_empty() && section_key(v).is_none()) {
            fields
                .entry(key.to_string())
                .or_insert_with(|| value.to_string());
        }
    }

    fields
}

fn section_key(line: &str) -> Option<&str> {
    line.strip_prefix('%')?
        .strip_suffix('%')
        .filter(|key| !key.is_empty())
}

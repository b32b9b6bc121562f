//! Logical package grouping.
//!
//! Package files are named `name-version-release-arch.pkg.tar.<comp>` and
//! source files `name-version-release.src.tar.<comp>`. Dropping the trailing
//! hyphen components and the compression suffix yields a key shared by every
//! historical build of the same artifact.

use std::collections::BTreeMap;

use pacprune_core::constants::{
    COMPRESSION_SUFFIXES, PACKAGE_MARKER, PACKAGE_NAME_DEPTH, SOURCE_MARKER, SOURCE_NAME_DEPTH,
};

use super::types::Entry;

/// Identity of a package group.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackageKey {
    pub name: String,
    /// Extension with compression components removed, e.g. `.pkg.tar.sig`.
    pub extension: String,
}

/// Derive the group key of a bare filename.
pub fn package_key(filename: &str) -> PackageKey {
    let last = filename.rsplit('-').next().unwrap_or(filename);
    let extension = normalize_extension(raw_extension(last));

    let depth = if extension.starts_with(SOURCE_MARKER) {
        SOURCE_NAME_DEPTH
    } else {
        PACKAGE_NAME_DEPTH
    };
    // Too few components leaves the whole filename as the name.
    let name = filename
        .rsplitn(depth + 1, '-')
        .last()
        .unwrap_or(filename)
        .to_string();

    PackageKey { name, extension }
}

/// The extension part of the last hyphen component.
///
/// Starts at the `.src.tar` / `.pkg.tar` marker when present, so dotted
/// release numbers (`1.1.src.tar.zst`) stay out of it.
fn raw_extension(last: &str) -> &str {
    let source = format!("{SOURCE_MARKER}.tar");
    let package = format!("{PACKAGE_MARKER}.tar");
    let start = last
        .find(&source)
        .or_else(|| last.find(&package))
        .or_else(|| last.find('.'));
    match start {
        Some(at) => &last[at..],
        None => "",
    }
}

/// Remove `.xz`, `.zst` and `.gz` components from an extension.
pub fn normalize_extension(extension: &str) -> String {
    extension
        .split('.')
        .filter(|part| !part.is_empty() && !COMPRESSION_SUFFIXES.contains(part))
        .map(|part| format!(".{part}"))
        .collect()
}

/// Partition entries by package key.
///
/// Each group is sorted oldest first, ties broken by name, so the result does
/// not depend on listing order.
pub fn group_entries(entries: impl IntoIterator<Item = Entry>) -> BTreeMap<PackageKey, Vec<Entry>> {
    let mut groups: BTreeMap<PackageKey, Vec<Entry>> = BTreeMap::new();
    for entry in entries {
        groups.entry(package_key(&entry.name)).or_default().push(entry);
    }
    for group in groups.values_mut() {
        group.sort_by(|a, b| a.modified.cmp(&b.modified).then_with(|| a.name.cmp(&b.name)));
    }
    groups
}

//! Protected filename patterns.
//!
//! Only `*` is special: it matches any run of characters, including none.
//! Matching is case-sensitive and always against the whole bare filename.

use std::collections::BTreeSet;
use std::fmt;

use pacprune_core::constants::BASELINE_PATTERNS;

/// A compiled `*`-only glob.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GlobPattern {
    raw: String,
    /// Literal runs between wildcards. `parts.len() == 1` means no wildcard.
    parts: Vec<String>,
}

impl GlobPattern {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let parts = raw.split('*').map(str::to_string).collect();
        Self { raw, parts }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether `name` matches the whole pattern.
    pub fn matches(&self, name: &str) -> bool {
        let (first, rest) = match self.parts.split_first() {
            Some(split) => split,
            None => return name.is_empty(),
        };
        let Some((last, middle)) = rest.split_last() else {
            return name == first;
        };

        if name.len() < first.len() + last.len()
            || !name.starts_with(first.as_str())
            || !name.ends_with(last.as_str())
        {
            return false;
        }

        // Leftmost placement of each middle literal is optimal for `*`-only globs.
        let mut window = &name[first.len()..name.len() - last.len()];
        for part in middle {
            match window.find(part.as_str()) {
                Some(at) => window = &window[at + part.len()..],
                None => return false,
            }
        }
        true
    }
}

impl fmt::Display for GlobPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A deduplicated set of protected patterns for one directory or one index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProtectedSet {
    patterns: BTreeSet<GlobPattern>,
}

impl ProtectedSet {
    /// An empty set, without the baseline.
    pub fn new() -> Self {
        Self::default()
    }

    /// A set holding only the baseline index-file patterns.
    pub fn baseline() -> Self {
        let mut set = Self::new();
        for pattern in BASELINE_PATTERNS {
            set.insert(pattern);
        }
        set
    }

    pub fn insert(&mut self, pattern: impl Into<String>) -> bool {
        self.patterns.insert(GlobPattern::new(pattern))
    }

    /// Union `other` into `self`.
    pub fn merge(&mut self, other: &ProtectedSet) {
        self.patterns.extend(other.patterns.iter().cloned());
    }

    /// Whether any pattern matches `name`.
    pub fn is_protected(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(name))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

//! Package archive filename shape check.

use std::sync::LazyLock;

use regex::Regex;

/// `name-version-release-arch.pkg.tar[.zst|.xz|.gz]`. The name itself may contain hyphens.
static PACKAGE_FILENAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^/]+-[^-/]+-[^-/]+-[^-/]+\.pkg\.tar(\.(zst|xz|gz))?$")
        .unwrap_or_else(|e| unreachable!("package filename regex is valid: {e}"))
});

/// Whether `filename` has the shape of a binary package archive.
pub fn is_package_filename(filename: &str) -> bool {
    PACKAGE_FILENAME.is_match(filename)
}

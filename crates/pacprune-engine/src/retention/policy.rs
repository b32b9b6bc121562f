//! Age + quorum retention policy.
//!
//! ```text
//! cutoff = newest index mtime - window
//! old(e) = mtime(e) <= cutoff
//! ```
//!
//! For a group sorted oldest first, the deletable entries are always a prefix:
//! - with a first non-old entry at `i`: the first `i - 2` entries
//!   (both entries right before `i` are kept);
//! - with no non-old entry: every entry if the newest is older than
//!   `cutoff - grace * window`, otherwise all but the newest.

use chrono::{DateTime, Duration, Utc};

/// Policy parameters shared by every directory of one plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    pub cutoff: DateTime<Utc>,
    pub window: Duration,
    pub grace_multiplier: u32,
}

/// Entries kept in front of the first non-old one.
const KEPT_BEFORE_LIVE: usize = 2;

impl RetentionPolicy {
    /// Build the policy from the newest index mtime.
    pub fn new(newest_index: DateTime<Utc>, window: Duration, grace_multiplier: u32) -> Self {
        let cutoff = newest_index
            .checked_sub_signed(window)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Self {
            cutoff,
            window,
            grace_multiplier,
        }
    }

    /// At or before the cutoff.
    pub fn is_old(&self, modified: DateTime<Utc>) -> bool {
        modified <= self.cutoff
    }

    /// Older than the cutoff by more than `grace_multiplier` windows.
    pub fn is_abandoned(&self, newest: DateTime<Utc>) -> bool {
        let age = (self.cutoff - newest).num_milliseconds();
        let grace = self
            .window
            .num_milliseconds()
            .saturating_mul(i64::from(self.grace_multiplier));
        age > grace
    }

    /// Number of leading entries of `sorted` (oldest first) that may be deleted,
    /// before protection is applied.
    pub fn deletable_prefix(&self, sorted: &[DateTime<Utc>]) -> usize {
        match sorted.iter().position(|t| !self.is_old(*t)) {
            // Keeping two entries rather than one is deliberate: it leaves a
            // spare build from before the cutoff in case the index changed
            // right around it.
            Some(first_live) => first_live.saturating_sub(KEPT_BEFORE_LIVE),
            None => match sorted.last() {
                None => 0,
                Some(newest) if self.is_abandoned(*newest) => sorted.len(),
                Some(_) => sorted.len() - 1,
            },
        }
    }
}

//! Retention policy configuration.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_GRACE_MULTIPLIER;
use crate::errors::ConfigError;

/// Configuration for the retention engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RetentionConfig {
    /// Retention window in days. No default: the operator must choose one.
    pub window_days: Option<u64>,
    /// Multiple of the window after which a fully stale group is abandoned. Default: 4.
    pub grace_multiplier: Option<u32>,
}

impl RetentionConfig {
    /// Returns the retention window, or `MissingValue` when no layer set one.
    pub fn effective_window(&self) -> Result<chrono::Duration, ConfigError> {
        let days = self.window_days.ok_or_else(|| ConfigError::MissingValue {
            field: "retention.window_days".to_string(),
            hint: "pass --retention-days, set PACPRUNE_RETENTION_DAYS, or add it to pacprune.toml"
                .to_string(),
        })?;
        let days = i64::try_from(days).map_err(|_| ConfigError::ValidationFailed {
            field: "retention.window_days".to_string(),
            message: "value is too large".to_string(),
        })?;
        chrono::Duration::try_days(days).ok_or_else(|| ConfigError::ValidationFailed {
            field: "retention.window_days".to_string(),
            message: "value is too large".to_string(),
        })
    }

    /// Returns the effective grace multiplier, defaulting to 4.
    pub fn effective_grace_multiplier(&self) -> u32 {
        self.grace_multiplier.unwrap_or(DEFAULT_GRACE_MULTIPLIER)
    }
}

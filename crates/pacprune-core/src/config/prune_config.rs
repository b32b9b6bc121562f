//! Top-level pacprune configuration with layered resolution.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{RetentionConfig, ScanConfig};
use crate::constants::PROJECT_CONFIG_FILE;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`PACPRUNE_*`)
/// 3. Project config (`--config` file, or `pacprune.toml` in the working directory)
/// 4. User config (`~/.pacprune/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PruneConfig {
    pub retention: RetentionConfig,
    pub scan: ScanConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_file: Option<PathBuf>,
    pub retention_days: Option<u64>,
    pub grace_multiplier: Option<u32>,
    pub index_suffix: Option<String>,
    pub sources_dir: Option<String>,
    pub threads: Option<usize>,
}

impl PruneConfig {
    /// Load configuration with layered resolution.
    ///
    /// `project_dir` is searched for `pacprune.toml` unless the overrides name
    /// an explicit config file, in which case that file must exist.
    pub fn load(
        project_dir: &Path,
        cli_overrides: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        // Unreadable user config is not fatal; keep the defaults.
                        tracing::warn!(path = %user_config_path.display(), error = %e, "ignoring user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let explicit = cli_overrides.and_then(|cli| cli.config_file.as_deref());
        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::FileNotFound {
                        path: path.display().to_string(),
                    });
                }
                Self::merge_toml_file(&mut config, path)?;
            }
            None => {
                let project_config_path = project_dir.join(PROJECT_CONFIG_FILE);
                if project_config_path.exists() {
                    Self::merge_toml_file(&mut config, &project_config_path)?;
                }
            }
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    ///
    /// A missing retention window is not a validation failure here; it is
    /// reported by `RetentionConfig::effective_window` when the engine needs it.
    pub fn validate(config: &PruneConfig) -> Result<(), ConfigError> {
        if config.retention.window_days == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "retention.window_days".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.retention.grace_multiplier == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "retention.grace_multiplier".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(ref suffix) = config.scan.index_suffix {
            if suffix.is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "scan.index_suffix".to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        if let Some(ref dir) = config.scan.sources_dir {
            if !is_single_dir_name(dir) {
                return Err(ConfigError::ValidationFailed {
                    field: "scan.sources_dir".to_string(),
                    message: "must be a single directory name".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.pacprune/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".pacprune").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut PruneConfig, path: &Path) -> Result<(), ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                path: path.display().to_string(),
            })?;

        let file_config: PruneConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut PruneConfig, other: &PruneConfig) {
        if other.retention.window_days.is_some() {
            base.retention.window_days = other.retention.window_days;
        }
        if other.retention.grace_multiplier.is_some() {
            base.retention.grace_multiplier = other.retention.grace_multiplier;
        }
        if other.scan.index_suffix.is_some() {
            base.scan.index_suffix = other.scan.index_suffix.clone();
        }
        if other.scan.sources_dir.is_some() {
            base.scan.sources_dir = other.scan.sources_dir.clone();
        }
        if other.scan.threads.is_some() {
            base.scan.threads = other.scan.threads;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `PACPRUNE_RETENTION_DAYS`, `PACPRUNE_INDEX_SUFFIX`, etc.
    fn apply_env_overrides(config: &mut PruneConfig) {
        if let Ok(val) = std::env::var("PACPRUNE_RETENTION_DAYS") {
            if let Ok(v) = val.parse::<u64>() {
                config.retention.window_days = Some(v);
            }
        }
        if let Ok(val) = std::env::var("PACPRUNE_GRACE_MULTIPLIER") {
            if let Ok(v) = val.parse::<u32>() {
                config.retention.grace_multiplier = Some(v);
            }
        }
        if let Ok(val) = std::env::var("PACPRUNE_INDEX_SUFFIX") {
            config.scan.index_suffix = Some(val);
        }
        if let Ok(val) = std::env::var("PACPRUNE_SOURCES_DIR") {
            config.scan.sources_dir = Some(val);
        }
        if let Ok(val) = std::env::var("PACPRUNE_THREADS") {
            if let Ok(v) = val.parse::<usize>() {
                config.scan.threads = Some(v);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut PruneConfig, cli: &CliOverrides) {
        if let Some(v) = cli.retention_days {
            config.retention.window_days = Some(v);
        }
        if let Some(v) = cli.grace_multiplier {
            config.retention.grace_multiplier = Some(v);
        }
        if let Some(ref v) = cli.index_suffix {
            config.scan.index_suffix = Some(v.clone());
        }
        if let Some(ref v) = cli.sources_dir {
            config.scan.sources_dir = Some(v.clone());
        }
        if let Some(v) = cli.threads {
            config.scan.threads = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// One plain directory name: not empty, no separators, not `.` or `..`.
fn is_single_dir_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !name.contains(['/', '\\'])
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}

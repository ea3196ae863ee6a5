//! Configuration file loading with precedence handling.

use super::Tuning;
use crate::constants::{FRAME_INTERVAL_MS, MAX_SETTLE_DURATION_MS};
use crate::state::Interpolator;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A value parsed but cannot drive the gesture (e.g. a zero threshold).
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Offending key.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/dualswipe/config.toml`:
///
/// ```toml
/// scroll_threshold = 20.0
/// commit_factor = 10.0
/// settle_duration_ms = 200
/// interpolator = "accelerate-decelerate"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Per-move threshold for the primary pointer, in px.
    #[serde(default)]
    pub scroll_threshold: Option<f32>,

    /// Commit distance as a multiple of the threshold.
    #[serde(default)]
    pub commit_factor: Option<f32>,

    /// Settle animation duration in milliseconds.
    #[serde(default)]
    pub settle_duration_ms: Option<u64>,

    /// Mirror parking position on the target display.
    #[serde(default)]
    pub mirror_offset_x: Option<f32>,

    /// Origin surface position at the end of a commit.
    #[serde(default)]
    pub commit_offset_x: Option<f32>,

    /// Settle curve name.
    #[serde(default)]
    pub interpolator: Option<Interpolator>,

    /// Frame spacing used by trace replay.
    #[serde(default)]
    pub frame_interval_ms: Option<u64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Parameters handed to the migration core.
    pub tuning: Tuning,
    /// Frame spacing used by trace replay.
    pub frame_interval_ms: u64,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            tuning: Tuning::default(),
            frame_interval_ms: FRAME_INTERVAL_MS,
            log_file_path: default_log_path(),
        }
    }
}

impl ResolvedConfig {
    /// Reject values the gesture cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.tuning;
        if !(t.scroll_threshold.is_finite() && t.scroll_threshold > 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "scroll_threshold",
                reason: format!("must be a positive number, got {}", t.scroll_threshold),
            });
        }
        if !(t.commit_factor.is_finite() && t.commit_factor >= 1.0) {
            return Err(ConfigError::InvalidValue {
                field: "commit_factor",
                reason: format!("must be at least 1, got {}", t.commit_factor),
            });
        }
        if t.settle_duration_ms > MAX_SETTLE_DURATION_MS {
            return Err(ConfigError::InvalidValue {
                field: "settle_duration_ms",
                reason: format!(
                    "must be at most {MAX_SETTLE_DURATION_MS}, got {}",
                    t.settle_duration_ms
                ),
            });
        }
        if self.frame_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "frame_interval_ms",
                reason: "must be non-zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/dualswipe/dualswipe.log` on Unix-like systems.
/// If the state directory cannot be determined, falls back to the current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("dualswipe").join("dualswipe.log")
    } else {
        PathBuf::from("dualswipe.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path (`~/.config/dualswipe/config.toml` on Unix).
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("dualswipe").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `DUALSWIPE_CONFIG` environment variable
/// 3. Default path `~/.config/dualswipe/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("DUALSWIPE_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `DUALSWIPE_INTERPOLATOR`: settle curve name; unknown names are ignored
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(curve) = std::env::var("DUALSWIPE_INTERPOLATOR")
        .ok()
        .and_then(|name| Interpolator::from_name(&name))
    {
        config.tuning.interpolator = curve;
    }

    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    let d = defaults.tuning;
    ResolvedConfig {
        tuning: Tuning {
            scroll_threshold: config.scroll_threshold.unwrap_or(d.scroll_threshold),
            commit_factor: config.commit_factor.unwrap_or(d.commit_factor),
            settle_duration_ms: config.settle_duration_ms.unwrap_or(d.settle_duration_ms),
            mirror_offset_x: config.mirror_offset_x.unwrap_or(d.mirror_offset_x),
            commit_offset_x: config.commit_offset_x.unwrap_or(d.commit_offset_x),
            interpolator: config.interpolator.unwrap_or(d.interpolator),
        },
        frame_interval_ms: config
            .frame_interval_ms
            .unwrap_or(defaults.frame_interval_ms),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest).
/// Only flags the user actually passed are applied.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    frame_interval_override: Option<u64>,
    interpolator_override: Option<Interpolator>,
) -> ResolvedConfig {
    if let Some(interval) = frame_interval_override {
        config.frame_interval_ms = interval;
    }

    if let Some(curve) = interpolator_override {
        config.tuning.interpolator = curve;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;

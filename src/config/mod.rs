//! Configuration module.

pub mod loader;

pub use loader::{
    apply_cli_overrides, apply_env_overrides, default_config_path, default_log_path,
    load_config_file, load_config_with_precedence, merge_config, ConfigError, ConfigFile,
    ResolvedConfig,
};

use crate::constants::{
    COMMIT_FACTOR, COMMIT_OFFSET_X, MIRROR_OFFSET_X, SCROLL_THRESHOLD, SETTLE_DURATION_MS,
};
use crate::state::Interpolator;

/// Gesture and settle parameters consumed by the migration core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    /// Minimum |dx| of the primary pointer (px) for a move to count.
    pub scroll_threshold: f32,
    /// Commit when |total offset| reaches `scroll_threshold * commit_factor`.
    pub commit_factor: f32,
    /// Settle animation length.
    pub settle_duration_ms: u64,
    /// Where the mirror is parked on the target display.
    pub mirror_offset_x: f32,
    /// Where the origin surface is pushed on commit.
    pub commit_offset_x: f32,
    /// Settle animation curve.
    pub interpolator: Interpolator,
}

impl Tuning {
    /// Displacement at which a release commits the migration.
    pub fn commit_distance(&self) -> f32 {
        self.scroll_threshold * self.commit_factor
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            scroll_threshold: SCROLL_THRESHOLD,
            commit_factor: COMMIT_FACTOR,
            settle_duration_ms: SETTLE_DURATION_MS,
            mirror_offset_x: MIRROR_OFFSET_X,
            commit_offset_x: COMMIT_OFFSET_X,
            interpolator: Interpolator::default(),
        }
    }
}

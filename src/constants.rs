//! Gesture and animation constants.
//!
//! These are the defaults for [`crate::config::Tuning`]; every runtime
//! component reads the tuning, never these directly.

/// Minimum horizontal movement of the primary pointer (px) before a move
/// is reported as a drag delta.
pub const SCROLL_THRESHOLD: f32 = 20.0;

/// Multiplier applied to [`SCROLL_THRESHOLD`] to get the commit distance.
pub const COMMIT_FACTOR: f32 = 10.0;

/// Settle animation length in milliseconds.
pub const SETTLE_DURATION_MS: u64 = 200;

/// Longest settle animation a configuration may ask for.
pub const MAX_SETTLE_DURATION_MS: u64 = 10_000;

/// Horizontal position the mirror is parked at on the target display.
pub const MIRROR_OFFSET_X: f32 = -1440.0;

/// Horizontal position the origin surface is pushed to when committing.
///
/// Fixed regardless of drag direction.
pub const COMMIT_OFFSET_X: f32 = 1440.0;

/// Frame spacing used by the trace replay when driving animations.
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Largest event time (ms) a pointer trace may carry.
///
/// Leaves headroom above every accepted timestamp for the replay's frame clock.
pub const MAX_TRACE_TIMESTAMP_MS: u64 = 1 << 53;

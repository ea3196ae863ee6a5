//! Gesture-driven migration state machine (pure with respect to I/O).
//!
//! Input flows downward: raw pointer events → [`GestureTracker`] →
//! [`MigrationSession`] → [`TransformAnimator`] for the settle phase.
//! [`SwipeController`] ties the three together for a host.

pub mod animator;
pub mod controller;
pub mod gesture;
pub mod session;

// Re-export for convenience
pub use animator::{Frame, Interpolator, TransformAnimator};
pub use controller::SwipeController;
pub use gesture::{GestureSignal, GestureTracker};
pub use session::{MigrationSession, Outcome, PhaseKind, SessionSnapshot};

//! Domain model types (pure).
//!
//! Identifiers, raw pointer input, and the error taxonomy.

pub mod error;
pub mod identifiers;
pub mod pointer;

// Re-export for convenience
pub use error::{AppError, SessionRefusal, TraceError};
pub use identifiers::{ActivityId, DisplayId, PointerId, SurfaceHandle, TaskId};
pub use pointer::{PointerEvent, PointerKind, PointerSample};

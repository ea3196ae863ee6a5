//! Interfaces to the hosting window system.
//!
//! The gesture core never owns displays, tasks, or the compositor. It talks to
//! them through the narrow traits below, which a real window manager (or the
//! in-memory [`crate::sim::SimulatedHost`]) implements. All calls happen on the
//! host's single control thread and must not block.

pub mod surface;
pub mod transaction;

pub use surface::{MirrorSurface, OriginSurface};
pub use transaction::{SurfaceOp, Transaction};

use crate::model::{ActivityId, DisplayId, SurfaceHandle, TaskId};

/// The focused task on a display, as reported by the window registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Task identity.
    pub id: TaskId,
    /// Root activity is the home/launcher type.
    pub is_home: bool,
    /// Surface of the task's top visible activity, if it has one.
    pub top_surface: Option<SurfaceHandle>,
}

/// Focused-task lookup.
pub trait TaskLookup {
    /// The task holding focus on `display`, if any.
    fn focused_task(&self, display: DisplayId) -> Option<Task>;
}

/// Display registry.
pub trait DisplayRegistry {
    /// All displays in registry iteration order.
    fn displays(&self) -> Vec<DisplayId>;

    /// Root layer that windowing content of `display` is parented under.
    fn windowing_layer(&self, display: DisplayId) -> Option<SurfaceHandle>;
}

/// Compositor surface primitives.
pub trait SurfaceApi {
    /// Create a mirror of `source`. The caller owns the returned surface.
    fn mirror(&mut self, source: &SurfaceHandle) -> Option<SurfaceHandle>;

    /// Liveness probe.
    fn is_valid(&self, surface: &SurfaceHandle) -> bool;

    /// Apply a transaction atomically and immediately.
    fn apply(&mut self, transaction: Transaction);
}

/// Launch-behind toggling for home activities.
pub trait VisibilityToggler {
    /// Call `f` once per activity of the home task.
    fn for_each_home_activity(&self, f: &mut dyn FnMut(ActivityId));
    /// Keep `activity` visible behind the dragged task while `launch_behind` is set.
    fn set_launch_behind(&mut self, activity: ActivityId, launch_behind: bool);
    /// Re-evaluate `activity`'s visibility after a toggle.
    fn refresh_visibility(&mut self, activity: ActivityId);
}

/// Fire-and-forget request to reparent a task to another display.
pub trait TaskMigrator {
    /// Move `task` to `display`, optionally with the host's own animation.
    fn move_task_to_display(&mut self, task: TaskId, display: DisplayId, animate: bool);
}

/// Everything the migration core needs from its host.
pub trait WindowHost:
    TaskLookup + DisplayRegistry + SurfaceApi + VisibilityToggler + TaskMigrator
{
}

impl<T> WindowHost for T where
    T: TaskLookup + DisplayRegistry + SurfaceApi + VisibilityToggler + TaskMigrator
{
}

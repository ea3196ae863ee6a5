//! In-memory window host.
//!
//! [`SimulatedHost`] implements every host trait over plain collections and
//! records each call it receives as a [`HostCall`]. The replay binary prints
//! that record; tests assert on it.

use crate::host::{
    DisplayRegistry, SurfaceApi, SurfaceOp, Task, TaskLookup, TaskMigrator, Transaction,
    VisibilityToggler,
};
use crate::model::{ActivityId, DisplayId, SurfaceHandle, TaskId};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// One observable interaction with the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum HostCall {
    /// `SurfaceApi::mirror` succeeded.
    Mirror {
        /// Surface that was mirrored.
        source: SurfaceHandle,
        /// Newly created mirror.
        mirror: SurfaceHandle,
    },
    /// A transaction was applied.
    Apply {
        /// Display the transaction targeted.
        display: DisplayId,
        /// Its operations, in order.
        ops: Vec<SurfaceOp>,
    },
    /// Launch-behind was toggled.
    SetLaunchBehind {
        /// Home activity toggled.
        activity: ActivityId,
        /// New value.
        launch_behind: bool,
    },
    /// Visibility was re-evaluated.
    RefreshVisibility {
        /// Activity refreshed.
        activity: ActivityId,
    },
    /// A task migration was requested.
    MoveTaskToDisplay {
        /// Task to move.
        task: TaskId,
        /// Destination display.
        display: DisplayId,
        /// Whether the host should animate the move.
        animate: bool,
    },
}

#[derive(Debug, Clone)]
struct SimDisplay {
    id: DisplayId,
    layer: Option<SurfaceHandle>,
    focused: Option<Task>,
}

/// A scripted set of displays, tasks and surfaces.
#[derive(Debug, Clone, Default)]
pub struct SimulatedHost {
    displays: Vec<SimDisplay>,
    home_activities: Vec<ActivityId>,
    launch_behind: BTreeSet<ActivityId>,
    live: BTreeSet<u64>,
    positions: BTreeMap<u64, (f32, f32)>,
    parents: BTreeMap<u64, u64>,
    next_surface: u64,
    mirrors_fail: bool,
    calls: Vec<HostCall>,
}

impl SimulatedHost {
    /// Host with no displays.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a display with a live windowing layer, after those already present.
    pub fn with_display(mut self, id: u32) -> Self {
        let layer = self.allocate();
        self.displays.push(SimDisplay {
            id: DisplayId::new(id),
            layer: Some(layer),
            focused: None,
        });
        self
    }

    /// Focus a task with one visible surface on `display`.
    pub fn with_focused_task(mut self, display: u32, task: u32, is_home: bool) -> Self {
        let surface = self.allocate();
        if let Some(d) = self.display_mut(DisplayId::new(display)) {
            d.focused = Some(Task {
                id: TaskId::new(task),
                is_home,
                top_surface: Some(surface),
            });
        }
        self
    }

    /// Register a home activity for launch-behind toggling.
    pub fn with_home_activity(mut self, activity: u32) -> Self {
        self.home_activities.push(ActivityId::new(activity));
        self
    }

    /// Make every subsequent `mirror` call fail.
    pub fn with_failing_mirrors(mut self) -> Self {
        self.mirrors_fail = true;
        self
    }

    /// Drop the windowing layer of `display` (the display stays registered).
    pub fn remove_windowing_layer(&mut self, display: DisplayId) {
        let layer = self.display_mut(display).and_then(|d| d.layer.take());
        if let Some(layer) = layer {
            self.live.remove(&layer.get());
        }
    }

    /// Tear a surface down behind the core's back.
    pub fn invalidate(&mut self, surface: &SurfaceHandle) {
        self.live.remove(&surface.get());
    }

    /// Every call received so far.
    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    /// Drain the call record.
    pub fn take_calls(&mut self) -> Vec<HostCall> {
        std::mem::take(&mut self.calls)
    }

    /// Surface of the task focused on `display`.
    pub fn focused_surface(&self, display: DisplayId) -> Option<SurfaceHandle> {
        self.display(display)
            .and_then(|d| d.focused.as_ref())
            .and_then(|t| t.top_surface.clone())
    }

    /// Display currently showing `task`.
    pub fn display_of(&self, task: TaskId) -> Option<DisplayId> {
        self.displays
            .iter()
            .find(|d| d.focused.as_ref().is_some_and(|t| t.id == task))
            .map(|d| d.id)
    }

    /// Last position applied to a live surface.
    pub fn position(&self, surface: &SurfaceHandle) -> Option<(f32, f32)> {
        self.positions.get(&surface.get()).copied()
    }

    /// Parent a surface was reparented under.
    pub fn parent(&self, surface: &SurfaceHandle) -> Option<SurfaceHandle> {
        self.parents.get(&surface.get()).copied().map(SurfaceHandle::new)
    }

    /// Whether `activity` is currently in launch-behind mode.
    pub fn is_launch_behind(&self, activity: ActivityId) -> bool {
        self.launch_behind.contains(&activity)
    }

    /// Surfaces created by `mirror` that are still alive.
    pub fn live_mirrors(&self) -> Vec<SurfaceHandle> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HostCall::Mirror { mirror, .. } if self.live.contains(&mirror.get()) => {
                    Some(mirror.clone())
                }
                _ => None,
            })
            .collect()
    }

    /// Every `move_task_to_display` request as `(task, display, animate)`.
    pub fn migrations(&self) -> Vec<(TaskId, DisplayId, bool)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                HostCall::MoveTaskToDisplay {
                    task,
                    display,
                    animate,
                } => Some((*task, *display, *animate)),
                _ => None,
            })
            .collect()
    }

    fn allocate(&mut self) -> SurfaceHandle {
        self.next_surface += 1;
        self.live.insert(self.next_surface);
        SurfaceHandle::new(self.next_surface)
    }

    fn display(&self, id: DisplayId) -> Option<&SimDisplay> {
        self.displays.iter().find(|d| d.id == id)
    }

    fn display_mut(&mut self, id: DisplayId) -> Option<&mut SimDisplay> {
        self.displays.iter_mut().find(|d| d.id == id)
    }
}

impl TaskLookup for SimulatedHost {
    fn focused_task(&self, display: DisplayId) -> Option<Task> {
        self.display(display).and_then(|d| d.focused.clone())
    }
}

impl DisplayRegistry for SimulatedHost {
    fn displays(&self) -> Vec<DisplayId> {
        self.displays.iter().map(|d| d.id).collect()
    }

    fn windowing_layer(&self, display: DisplayId) -> Option<SurfaceHandle> {
        self.display(display).and_then(|d| d.layer.clone())
    }
}

impl SurfaceApi for SimulatedHost {
    fn mirror(&mut self, source: &SurfaceHandle) -> Option<SurfaceHandle> {
        if self.mirrors_fail || !self.live.contains(&source.get()) {
            return None;
        }
        let mirror = self.allocate();
        self.calls.push(HostCall::Mirror {
            source: source.clone(),
            mirror: mirror.clone(),
        });
        Some(mirror)
    }

    fn is_valid(&self, surface: &SurfaceHandle) -> bool {
        self.live.contains(&surface.get())
    }

    fn apply(&mut self, transaction: Transaction) {
        for op in transaction.ops() {
            match op {
                SurfaceOp::Reparent { surface, parent } => {
                    self.parents.insert(surface.get(), parent.get());
                }
                SurfaceOp::SetPosition { surface, x, y } => {
                    if self.live.contains(&surface.get()) {
                        self.positions.insert(surface.get(), (*x, *y));
                    }
                }
                SurfaceOp::Remove { surface } => {
                    self.live.remove(&surface.get());
                    self.positions.remove(&surface.get());
                    self.parents.remove(&surface.get());
                }
            }
        }
        self.calls.push(HostCall::Apply {
            display: transaction.display(),
            ops: transaction.ops().to_vec(),
        });
    }
}

impl VisibilityToggler for SimulatedHost {
    fn for_each_home_activity(&self, f: &mut dyn FnMut(ActivityId)) {
        for activity in &self.home_activities {
            f(*activity);
        }
    }

    fn set_launch_behind(&mut self, activity: ActivityId, launch_behind: bool) {
        if launch_behind {
            self.launch_behind.insert(activity);
        } else {
            self.launch_behind.remove(&activity);
        }
        self.calls.push(HostCall::SetLaunchBehind {
            activity,
            launch_behind,
        });
    }

    fn refresh_visibility(&mut self, activity: ActivityId) {
        self.calls.push(HostCall::RefreshVisibility { activity });
    }
}

impl TaskMigrator for SimulatedHost {
    fn move_task_to_display(&mut self, task: TaskId, display: DisplayId, animate: bool) {
        self.calls.push(HostCall::MoveTaskToDisplay {
            task,
            display,
            animate,
        });
        let Some(from) = self.display_of(task) else {
            return;
        };
        let moved = self.display_mut(from).and_then(|d| d.focused.take());
        if let Some(d) = self.display_mut(display) {
            d.focused = moved;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_displays() -> SimulatedHost {
        SimulatedHost::new()
            .with_display(0)
            .with_display(1)
            .with_focused_task(0, 42, false)
    }

    #[test]
    fn registry_preserves_insertion_order() {
        let host = SimulatedHost::new().with_display(3).with_display(1);
        assert_eq!(host.displays(), vec![DisplayId::new(3), DisplayId::new(1)]);
    }

    #[test]
    fn removed_surface_is_invalid_and_unpositioned() {
        let mut host = two_displays();
        let surface = host
            .focused_surface(DisplayId::new(0))
            .expect("focused task has a surface");
        host.apply(Transaction::on(DisplayId::new(0)).set_position(&surface, 10.0, 0.0));
        assert_eq!(host.position(&surface), Some((10.0, 0.0)));

        host.apply(Transaction::on(DisplayId::new(0)).remove(&surface));
        assert!(!host.is_valid(&surface));
        assert_eq!(host.position(&surface), None);
    }

    #[test]
    fn migration_moves_focus_to_target_display() {
        let mut host = two_displays();
        host.move_task_to_display(TaskId::new(42), DisplayId::new(1), true);
        assert_eq!(host.display_of(TaskId::new(42)), Some(DisplayId::new(1)));
        assert_eq!(
            host.migrations(),
            vec![(TaskId::new(42), DisplayId::new(1), true)]
        );
    }

    #[test]
    fn mirror_of_dead_surface_fails() {
        let mut host = two_displays();
        let surface = host
            .focused_surface(DisplayId::new(0))
            .expect("focused task has a surface");
        host.invalidate(&surface);
        assert_eq!(host.mirror(&surface), None);
    }

    #[test]
    fn host_call_serializes_as_tagged_json() {
        let call = HostCall::MoveTaskToDisplay {
            task: TaskId::new(42),
            display: DisplayId::new(1),
            animate: true,
        };
        let json = serde_json::to_string(&call).expect("serialize");
        assert_eq!(
            json,
            r#"{"call":"move_task_to_display","task":42,"display":1,"animate":true}"#
        );
    }
}

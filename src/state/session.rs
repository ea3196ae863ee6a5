//! Task migration session.
//!
//! [`MigrationSession`] reacts to the tracker's `Begin` / `Delta` / `End` and to
//! animation frames. It owns the mirror surface for the life of a gesture,
//! moves the borrowed origin surface with the drag, and on release settles the
//! origin either off-screen (commit, then request the task move) or back to
//! zero (cancel).
//!
//! # Phases
//!
//! ```text
//! Idle ─begin─▶ Tracking ─drag─▶ Dragging ─release─▶ Settling ─last frame─▶ Idle
//!                  │                 │
//!                  └──── abandon ────┴──▶ Idle
//! ```
//!
//! The mirror exists exactly while the phase is `Tracking`, `Dragging` or
//! `Settling`; every path back to `Idle` releases it. `begin` during
//! `Settling` is refused, `begin` during `Tracking`/`Dragging` abandons the
//! open session first.

use crate::config::Tuning;
use crate::host::{MirrorSurface, OriginSurface, SurfaceApi, WindowHost};
use crate::model::{ActivityId, DisplayId, SessionRefusal, TaskId};
use crate::state::animator::{Frame, TransformAnimator};
use serde::Serialize;
use tracing::{debug, info, warn};

/// How a released drag resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The task moves to the target display.
    Commit,
    /// The origin surface snaps back; nothing moves.
    Cancel,
}

/// Observable phase of a [`MigrationSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    /// No gesture in progress.
    Idle,
    /// Session open, no qualifying move yet.
    Tracking,
    /// At least one delta applied.
    Dragging,
    /// Released; the settle animation is running.
    Settling,
}

/// Read-only view of the session for callers and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    /// Current phase.
    pub phase: PhaseKind,
    /// Task being dragged.
    pub task: Option<TaskId>,
    /// Display the task would migrate to.
    pub target: Option<DisplayId>,
    /// Sum of applied drag deltas; zero when idle.
    pub total_offset: f32,
    /// Whether a mirror surface is held. Origin liveness needs the host,
    /// see [`MigrationSession::origin_live`].
    pub has_mirror: bool,
    /// Decided outcome and animation endpoint while settling.
    pub settle: Option<(Outcome, f32)>,
}

/// Resources held between `begin` and the end of settling.
#[derive(Debug)]
struct OpenSession {
    task: TaskId,
    target: DisplayId,
    origin: OriginSurface,
    mirror: MirrorSurface,
    total_offset: f32,
    launch_behind: Vec<ActivityId>,
}

impl OpenSession {
    /// Push every home activity into launch-behind mode, once each.
    fn enter_launch_behind<H: WindowHost + ?Sized>(&mut self, host: &mut H) {
        let mut home = Vec::new();
        host.for_each_home_activity(&mut |activity| home.push(activity));

        for activity in home {
            if self.launch_behind.contains(&activity) {
                continue;
            }
            host.set_launch_behind(activity, true);
            host.refresh_visibility(activity);
            self.launch_behind.push(activity);
        }
    }

    /// Restore exactly the activities this session toggled.
    fn restore_launch_behind<H: WindowHost + ?Sized>(&mut self, host: &mut H) {
        for activity in self.launch_behind.drain(..) {
            host.set_launch_behind(activity, false);
            host.refresh_visibility(activity);
        }
    }
}

#[derive(Debug)]
struct Settle {
    session: OpenSession,
    outcome: Outcome,
    animator: TransformAnimator,
    started_at: Option<u64>,
}

#[derive(Debug)]
enum Phase {
    Idle,
    Tracking(OpenSession),
    Dragging(OpenSession),
    Settling(Settle),
}

/// Gesture-driven migration of the focused task off one display.
#[derive(Debug)]
pub struct MigrationSession {
    origin_display: DisplayId,
    tuning: Tuning,
    phase: Phase,
}

impl MigrationSession {
    /// Idle session for gestures on `origin_display`.
    pub fn new(origin_display: DisplayId, tuning: Tuning) -> Self {
        Self {
            origin_display,
            tuning,
            phase: Phase::Idle,
        }
    }

    /// Display gestures are performed on.
    pub fn origin_display(&self) -> DisplayId {
        self.origin_display
    }

    /// Current phase.
    pub fn phase(&self) -> PhaseKind {
        match self.phase {
            Phase::Idle => PhaseKind::Idle,
            Phase::Tracking(_) => PhaseKind::Tracking,
            Phase::Dragging(_) => PhaseKind::Dragging,
            Phase::Settling(_) => PhaseKind::Settling,
        }
    }

    /// Read-only view of the session.
    pub fn snapshot(&self) -> SessionSnapshot {
        let (open, settle) = match &self.phase {
            Phase::Idle => (None, None),
            Phase::Tracking(open) | Phase::Dragging(open) => (Some(open), None),
            Phase::Settling(s) => (Some(&s.session), Some((s.outcome, s.animator.end()))),
        };
        SessionSnapshot {
            phase: self.phase(),
            task: open.map(|o| o.task),
            target: open.map(|o| o.target),
            total_offset: open.map_or(0.0, |o| o.total_offset),
            has_mirror: open.is_some(),
            settle,
        }
    }

    /// Whether the session holds an origin surface the host still reports valid.
    pub fn origin_live<S: SurfaceApi + ?Sized>(&self, host: &S) -> bool {
        match &self.phase {
            Phase::Idle => false,
            Phase::Tracking(open) | Phase::Dragging(open) => open.origin.is_live(host),
            Phase::Settling(s) => s.session.origin.is_live(host),
        }
    }

    /// Open a session for the focused task of the origin display.
    ///
    /// On refusal nothing is allocated and the session is idle (or still
    /// settling, for [`SessionRefusal::Busy`]).
    pub fn begin<H: WindowHost + ?Sized>(&mut self, host: &mut H) -> Result<(), SessionRefusal> {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Idle => {}
            settling @ Phase::Settling(_) => {
                self.phase = settling;
                return Err(SessionRefusal::Busy);
            }
            Phase::Tracking(open) | Phase::Dragging(open) => {
                info!(task = %open.task, "new contact supersedes open session");
                Self::discard(host, open);
            }
        }

        let open = self.open(host)?;
        info!(
            task = %open.task,
            origin = %self.origin_display,
            target = %open.target,
            mirror = %open.mirror.handle(),
            "migration session opened"
        );
        self.phase = Phase::Tracking(open);
        Ok(())
    }

    fn open<H: WindowHost + ?Sized>(&self, host: &mut H) -> Result<OpenSession, SessionRefusal> {
        let origin = self.origin_display;
        let task = host
            .focused_task(origin)
            .ok_or(SessionRefusal::NoFocusedTask(origin))?;
        if task.is_home {
            return Err(SessionRefusal::HomeTask(task.id));
        }

        let target = host
            .displays()
            .into_iter()
            .find(|display| *display != origin)
            .ok_or(SessionRefusal::NoTargetDisplay(origin))?;

        let source = task
            .top_surface
            .filter(|surface| host.is_valid(surface))
            .ok_or(SessionRefusal::NoOriginSurface(task.id))?;

        let layer = host
            .windowing_layer(target)
            .ok_or(SessionRefusal::TargetLayerMissing(target))?;

        let mirror =
            MirrorSurface::attach(host, &source, target, &layer, self.tuning.mirror_offset_x)
                .ok_or(SessionRefusal::MirrorFailed(task.id))?;

        Ok(OpenSession {
            task: task.id,
            target,
            origin: OriginSurface::borrow(source, origin),
            mirror,
            total_offset: 0.0,
            launch_behind: Vec::new(),
        })
    }

    /// Accumulate a drag delta and move the origin surface with it.
    pub fn drag<H: WindowHost + ?Sized>(&mut self, host: &mut H, dx: f32) {
        self.phase = match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Tracking(mut open) | Phase::Dragging(mut open) => {
                open.total_offset += dx;
                open.enter_launch_behind(host);
                debug!(dx, total_offset = open.total_offset, "drag");
                open.origin.move_to(host, open.total_offset);
                Phase::Dragging(open)
            }
            other => {
                debug!(dx, "ignoring delta: no open session");
                other
            }
        };
    }

    /// Decide commit or cancel and start settling.
    pub fn release<H: WindowHost + ?Sized>(&mut self, host: &mut H) {
        let open = match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Tracking(open) | Phase::Dragging(open) => open,
            other => {
                debug!("ignoring release: no open session");
                self.phase = other;
                return;
            }
        };

        let (outcome, end) = if open.total_offset.abs() >= self.tuning.commit_distance() {
            (Outcome::Commit, self.tuning.commit_offset_x)
        } else {
            (Outcome::Cancel, 0.0)
        };
        info!(
            task = %open.task,
            total_offset = open.total_offset,
            ?outcome,
            end,
            "drag released"
        );

        if open.origin.live(&*host).is_none() {
            warn!(task = %open.task, "origin surface gone before settling; finishing at once");
            Self::finish(host, open, outcome);
            return;
        }

        let animator = TransformAnimator::new(
            open.total_offset,
            end,
            self.tuning.settle_duration_ms,
            self.tuning.interpolator,
        );
        self.phase = Phase::Settling(Settle {
            session: open,
            outcome,
            animator,
            started_at: None,
        });
    }

    /// Deliver an animation frame stamped `now_ms`.
    ///
    /// The first frame after a release starts the settle clock. Returns the
    /// outcome on the frame that completes settling.
    pub fn frame<H: WindowHost + ?Sized>(&mut self, host: &mut H, now_ms: u64) -> Option<Outcome> {
        let Phase::Settling(settle) = &mut self.phase else {
            return None;
        };

        let started = *settle.started_at.get_or_insert(now_ms);
        let elapsed = now_ms.saturating_sub(started);
        match settle.animator.step(host, &settle.session.origin, elapsed) {
            Frame::Completed(_) => {}
            Frame::Running(_) | Frame::Finished => return None,
        }

        let Phase::Settling(settle) = std::mem::replace(&mut self.phase, Phase::Idle) else {
            return None;
        };
        Self::finish(host, settle.session, settle.outcome);
        Some(settle.outcome)
    }

    /// Drop an open (not yet released) session, undoing its side effects.
    pub fn abandon<H: WindowHost + ?Sized>(&mut self, host: &mut H) {
        match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Tracking(open) | Phase::Dragging(open) => {
                debug!(task = %open.task, "session abandoned without drag release");
                Self::discard(host, open);
            }
            other => self.phase = other,
        }
    }

    fn discard<H: WindowHost + ?Sized>(host: &mut H, mut open: OpenSession) {
        if open.total_offset != 0.0 {
            open.origin.move_to(host, 0.0);
        }
        open.restore_launch_behind(host);
        open.mirror.release(host);
    }

    fn finish<H: WindowHost + ?Sized>(host: &mut H, mut open: OpenSession, outcome: Outcome) {
        open.restore_launch_behind(host);
        let OpenSession {
            task,
            target,
            mirror,
            ..
        } = open;
        mirror.release(host);

        match outcome {
            Outcome::Commit => {
                host.move_task_to_display(task, target, true);
                info!(%task, %target, "task migration requested");
            }
            Outcome::Cancel => info!(%task, "migration cancelled"),
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;

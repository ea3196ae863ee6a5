//! Tests for the migration session state machine.

use super::*;
use crate::host::DisplayRegistry;
use crate::sim::{HostCall, SimulatedHost};

// ===== Test Helpers =====

const ORIGIN: DisplayId = DisplayId::new(0);
const TARGET: DisplayId = DisplayId::new(1);

fn scene() -> SimulatedHost {
    SimulatedHost::new()
        .with_display(0)
        .with_display(1)
        .with_focused_task(0, 42, false)
        .with_home_activity(7)
}

fn session() -> MigrationSession {
    MigrationSession::new(ORIGIN, Tuning::default())
}

fn origin_surface(host: &SimulatedHost) -> crate::model::SurfaceHandle {
    host.focused_surface(ORIGIN).expect("origin task surface")
}

/// Deliver frames every 16ms from `start` until settling completes.
fn settle(session: &mut MigrationSession, host: &mut SimulatedHost, start: u64) -> Option<Outcome> {
    let mut now = start;
    for _ in 0..100 {
        if let Some(outcome) = session.frame(host, now) {
            return Some(outcome);
        }
        now += 16;
    }
    None
}

fn assert_closed(session: &MigrationSession) {
    let snap = session.snapshot();
    assert_eq!(snap.phase, PhaseKind::Idle);
    assert!(!snap.has_mirror);
    assert_eq!(snap.total_offset, 0.0);
    assert_eq!(snap.task, None);
}

// ===== begin =====

#[test]
fn begin_mirrors_origin_onto_target_offscreen() {
    let mut host = scene();
    let mut session = session();

    session.begin(&mut host).expect("session opens");

    let snap = session.snapshot();
    assert_eq!(snap.phase, PhaseKind::Tracking);
    assert_eq!(snap.task, Some(TaskId::new(42)));
    assert_eq!(snap.target, Some(TARGET));
    assert_eq!(snap.total_offset, 0.0);

    let mirrors = host.live_mirrors();
    assert_eq!(mirrors.len(), 1);
    assert_eq!(host.position(&mirrors[0]), Some((-1440.0, 0.0)));
    assert_eq!(host.parent(&mirrors[0]), host.windowing_layer(TARGET));
}

#[test]
fn begin_refuses_home_task() {
    let mut host = SimulatedHost::new()
        .with_display(0)
        .with_display(1)
        .with_focused_task(0, 1, true);
    let mut session = session();

    assert_eq!(
        session.begin(&mut host),
        Err(SessionRefusal::HomeTask(TaskId::new(1)))
    );
    assert_closed(&session);
    assert!(host.calls().is_empty());
}

#[test]
fn begin_refuses_without_second_display() {
    let mut host = SimulatedHost::new()
        .with_display(0)
        .with_focused_task(0, 42, false);
    let mut session = session();

    assert_eq!(
        session.begin(&mut host),
        Err(SessionRefusal::NoTargetDisplay(ORIGIN))
    );
    assert_closed(&session);
    assert!(host.live_mirrors().is_empty());
}

#[test]
fn begin_refuses_without_focused_task() {
    let mut host = SimulatedHost::new().with_display(0).with_display(1);
    let mut session = session();

    assert_eq!(
        session.begin(&mut host),
        Err(SessionRefusal::NoFocusedTask(ORIGIN))
    );
    assert_closed(&session);
}

#[test]
fn begin_refuses_when_target_layer_missing_and_leaves_no_mirror() {
    let mut host = scene();
    host.remove_windowing_layer(TARGET);
    let mut session = session();

    assert_eq!(
        session.begin(&mut host),
        Err(SessionRefusal::TargetLayerMissing(TARGET))
    );
    assert_closed(&session);
    assert!(host.live_mirrors().is_empty());
}

#[test]
fn begin_refuses_stale_origin_surface() {
    let mut host = scene();
    let surface = origin_surface(&host);
    host.invalidate(&surface);
    let mut session = session();

    assert_eq!(
        session.begin(&mut host),
        Err(SessionRefusal::NoOriginSurface(TaskId::new(42)))
    );
    assert_closed(&session);
}

#[test]
fn begin_refuses_when_mirror_cannot_be_created() {
    let mut host = scene().with_failing_mirrors();
    let mut session = session();

    assert_eq!(
        session.begin(&mut host),
        Err(SessionRefusal::MirrorFailed(TaskId::new(42)))
    );
    assert_closed(&session);
}

#[test]
fn target_is_first_other_display_in_registry_order() {
    let mut host = SimulatedHost::new()
        .with_display(5)
        .with_display(0)
        .with_display(3)
        .with_display(9)
        .with_focused_task(0, 42, false);
    let mut session = session();

    session.begin(&mut host).expect("session opens");
    assert_eq!(session.snapshot().target, Some(DisplayId::new(5)));
    session.abandon(&mut host);
}

// ===== drag =====

#[test]
fn drag_accumulates_and_moves_origin_only() {
    let mut host = scene();
    let mut session = session();
    session.begin(&mut host).expect("session opens");
    let surface = origin_surface(&host);
    let mirror = host.live_mirrors()[0].clone();

    session.drag(&mut host, 120.0);
    session.drag(&mut host, 40.0);

    let snap = session.snapshot();
    assert_eq!(snap.phase, PhaseKind::Dragging);
    assert_eq!(snap.total_offset, 160.0);
    assert_eq!(host.position(&surface), Some((160.0, 0.0)));
    assert_eq!(host.position(&mirror), Some((-1440.0, 0.0)));
}

#[test]
fn drag_enters_launch_behind_once() {
    let mut host = scene();
    let mut session = session();
    session.begin(&mut host).expect("session opens");

    session.drag(&mut host, 30.0);
    session.drag(&mut host, 30.0);

    assert!(host.is_launch_behind(ActivityId::new(7)));
    let toggles = host
        .calls()
        .iter()
        .filter(|c| matches!(c, HostCall::SetLaunchBehind { .. }))
        .count();
    assert_eq!(toggles, 1);
}

#[test]
fn drag_with_stale_origin_skips_transform_without_error() {
    let mut host = scene();
    let mut session = session();
    session.begin(&mut host).expect("session opens");
    let surface = origin_surface(&host);
    host.invalidate(&surface);
    host.take_calls();

    session.drag(&mut host, -25.0);

    assert_eq!(session.snapshot().total_offset, -25.0);
    assert!(!host
        .calls()
        .iter()
        .any(|c| matches!(c, HostCall::Apply { .. })));
}

#[test]
fn drag_without_session_is_ignored() {
    let mut host = scene();
    let mut session = session();
    session.drag(&mut host, 50.0);
    assert_closed(&session);
    assert!(host.calls().is_empty());
}

// ===== release / settle =====

#[test]
fn release_just_below_commit_distance_cancels_toward_zero() {
    let mut host = scene();
    let mut session = session();
    session.begin(&mut host).expect("session opens");
    session.drag(&mut host, 199.0);

    session.release(&mut host);

    assert_eq!(
        session.snapshot().settle,
        Some((Outcome::Cancel, 0.0))
    );
}

#[test]
fn release_at_commit_distance_commits_toward_fixed_endpoint() {
    let mut host = scene();
    let mut session = session();
    session.begin(&mut host).expect("session opens");
    session.drag(&mut host, 200.0);

    session.release(&mut host);

    assert_eq!(
        session.snapshot().settle,
        Some((Outcome::Commit, 1440.0))
    );
}

#[test]
fn leftward_drag_past_commit_distance_still_targets_positive_endpoint() {
    let mut host = scene();
    let mut session = session();
    session.begin(&mut host).expect("session opens");
    session.drag(&mut host, -260.0);

    session.release(&mut host);

    assert_eq!(
        session.snapshot().settle,
        Some((Outcome::Commit, 1440.0))
    );
}

#[test]
fn commit_completion_restores_releases_then_migrates() {
    let mut host = scene();
    let mut session = session();
    session.begin(&mut host).expect("session opens");
    session.drag(&mut host, 205.0);
    session.release(&mut host);
    let surface = origin_surface(&host);

    assert_eq!(settle(&mut session, &mut host, 1_000), Some(Outcome::Commit));

    assert_closed(&session);
    assert!(host.live_mirrors().is_empty());
    assert!(!host.is_launch_behind(ActivityId::new(7)));
    assert_eq!(host.migrations(), vec![(TaskId::new(42), TARGET, true)]);
    assert_eq!(host.position(&surface), Some((1440.0, 0.0)));

    // Migration is the last thing that happens.
    assert!(matches!(
        host.calls().last(),
        Some(HostCall::MoveTaskToDisplay { .. })
    ));
}

#[test]
fn cancel_completion_restores_position_and_never_migrates() {
    let mut host = scene();
    let mut session = session();
    session.begin(&mut host).expect("session opens");
    session.drag(&mut host, -25.0);
    session.release(&mut host);
    let surface = origin_surface(&host);

    assert_eq!(settle(&mut session, &mut host, 0), Some(Outcome::Cancel));

    assert_closed(&session);
    assert_eq!(host.position(&surface), Some((0.0, 0.0)));
    assert!(host.migrations().is_empty());
    assert!(host.live_mirrors().is_empty());
    assert!(!host.is_launch_behind(ActivityId::new(7)));
    assert_eq!(host.display_of(TaskId::new(42)), Some(ORIGIN));
}

#[test]
fn settle_clock_starts_at_first_frame() {
    let mut host = scene();
    let mut session = session();
    session.begin(&mut host).expect("session opens");
    session.drag(&mut host, 100.0);
    session.release(&mut host);
    let surface = origin_surface(&host);

    assert_eq!(session.frame(&mut host, 5_000), None);
    assert_eq!(host.position(&surface), Some((100.0, 0.0)));
    assert_eq!(session.frame(&mut host, 5_199), None);
    assert_eq!(session.frame(&mut host, 5_200), Some(Outcome::Cancel));
}

#[test]
fn frame_outside_settling_does_nothing() {
    let mut host = scene();
    let mut session = session();
    assert_eq!(session.frame(&mut host, 10), None);
    session.begin(&mut host).expect("session opens");
    assert_eq!(session.frame(&mut host, 20), None);
    assert_eq!(session.phase(), PhaseKind::Tracking);
}

#[test]
fn release_with_stale_origin_finishes_immediately() {
    let mut host = scene();
    let mut session = session();
    session.begin(&mut host).expect("session opens");
    session.drag(&mut host, 300.0);
    let surface = origin_surface(&host);
    host.invalidate(&surface);

    session.release(&mut host);

    assert_closed(&session);
    assert!(host.live_mirrors().is_empty());
    assert_eq!(host.migrations(), vec![(TaskId::new(42), TARGET, true)]);
}

#[test]
fn origin_live_follows_host_teardown() {
    let mut host = scene();
    let mut session = session();
    assert!(!session.origin_live(&host));

    session.begin(&mut host).expect("session opens");
    assert!(session.origin_live(&host));

    let surface = origin_surface(&host);
    host.invalidate(&surface);
    assert!(!session.origin_live(&host));
    assert!(session.snapshot().has_mirror);
}

#[test]
fn release_without_session_is_ignored() {
    let mut host = scene();
    let mut session = session();
    session.release(&mut host);
    assert_closed(&session);
}

// ===== abandon / exclusion =====

#[test]
fn abandon_after_tap_releases_mirror() {
    let mut host = scene();
    let mut session = session();
    session.begin(&mut host).expect("session opens");

    session.abandon(&mut host);

    assert_closed(&session);
    assert!(host.live_mirrors().is_empty());
    assert!(host.migrations().is_empty());
}

#[test]
fn abandon_after_drag_returns_origin_and_restores_visibility() {
    let mut host = scene();
    let mut session = session();
    session.begin(&mut host).expect("session opens");
    session.drag(&mut host, 80.0);
    let surface = origin_surface(&host);

    session.abandon(&mut host);

    assert_eq!(host.position(&surface), Some((0.0, 0.0)));
    assert!(!host.is_launch_behind(ActivityId::new(7)));
    assert_closed(&session);
}

#[test]
fn abandon_does_not_interrupt_settling() {
    let mut host = scene();
    let mut session = session();
    session.begin(&mut host).expect("session opens");
    session.drag(&mut host, 50.0);
    session.release(&mut host);

    session.abandon(&mut host);
    assert_eq!(session.phase(), PhaseKind::Settling);
}

#[test]
fn begin_while_settling_is_refused_busy() {
    let mut host = scene();
    let mut session = session();
    session.begin(&mut host).expect("session opens");
    session.drag(&mut host, 250.0);
    session.release(&mut host);

    assert_eq!(session.begin(&mut host), Err(SessionRefusal::Busy));
    assert_eq!(session.phase(), PhaseKind::Settling);
    assert_eq!(host.live_mirrors().len(), 1);
}

#[test]
fn begin_while_dragging_supersedes_open_session() {
    let mut host = scene();
    let mut session = session();
    session.begin(&mut host).expect("session opens");
    session.drag(&mut host, 60.0);
    let first_mirror = host.live_mirrors()[0].clone();

    session.begin(&mut host).expect("fresh session opens");

    let mirrors = host.live_mirrors();
    assert_eq!(mirrors.len(), 1);
    assert_ne!(mirrors[0], first_mirror);
    assert_eq!(session.snapshot().total_offset, 0.0);
    assert_eq!(session.phase(), PhaseKind::Tracking);
}

#[test]
fn new_session_after_commit_captures_new_task() {
    let mut host = scene();
    let mut session = session();
    session.begin(&mut host).expect("session opens");
    session.drag(&mut host, 220.0);
    session.release(&mut host);
    settle(&mut session, &mut host, 0);

    // Task 42 now lives on the target; focus a new task on the origin.
    let mut host = host.with_focused_task(0, 43, false);
    session.begin(&mut host).expect("fresh session opens");
    assert_eq!(session.snapshot().task, Some(TaskId::new(43)));
}

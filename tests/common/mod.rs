//! Shared scene and event builders for integration tests.
#![allow(dead_code)]

use dualswipe::config::Tuning;
use dualswipe::model::{DisplayId, PointerEvent, PointerKind, PointerSample};
use dualswipe::sim::SimulatedHost;
use dualswipe::state::{Outcome, SwipeController};

pub const HOME_ACTIVITY: u32 = 7;

/// Displays 0 and 1, task 42 focused on display 0, one home activity.
pub fn two_display_scene() -> SimulatedHost {
    SimulatedHost::new()
        .with_display(0)
        .with_display(1)
        .with_focused_task(0, 42, false)
        .with_home_activity(HOME_ACTIVITY)
}

pub fn controller() -> SwipeController {
    SwipeController::new(DisplayId::new(0), Tuning::default())
}

/// Event carrying pointers 0 and 1 at the given x-coordinates.
pub fn pair(kind: PointerKind, actor: u32, x_a: f32, x_b: f32) -> PointerEvent {
    PointerEvent::new(
        kind,
        actor,
        vec![PointerSample::new(0, x_a, 0.0), PointerSample::new(1, x_b, 0.0)],
    )
}

/// First finger, then second finger.
pub fn press(host: &mut SimulatedHost, c: &mut SwipeController, x_a: f32, x_b: f32) {
    let first = PointerEvent::new(PointerKind::Down, 0, vec![PointerSample::new(0, x_a, 0.0)]);
    c.handle_pointer(host, &first);
    c.handle_pointer(host, &pair(PointerKind::Down, 1, x_a, x_b));
}

/// Deliver 16ms frames until settling ends, returning the outcome.
pub fn settle(host: &mut SimulatedHost, c: &mut SwipeController) -> Option<Outcome> {
    let mut now = 1_000;
    for _ in 0..1_000 {
        if !c.is_settling() {
            break;
        }
        if let Some(outcome) = c.on_frame(host, now) {
            return Some(outcome);
        }
        now += 16;
    }
    None
}

//! Offline replay of a pointer trace.
//!
//! Stands in for the host's scheduler: pointer events are delivered in
//! order, and whenever a settle animation is running, frames are delivered
//! every `frame_interval_ms` until it completes. A frame due before the next
//! event is always delivered first.

use crate::host::WindowHost;
use crate::parser::TimedEvent;
use crate::state::{GestureSignal, Outcome, SwipeController};
use serde::Serialize;
use tracing::{debug, warn};

/// What a replay produced, besides the host's own record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReplayReport {
    /// Pointer events delivered.
    pub events: usize,
    /// `Begin` signals from the tracker.
    pub begins: usize,
    /// `Delta` signals from the tracker.
    pub deltas: usize,
    /// `End` signals from the tracker.
    pub ends: usize,
    /// Animation frames delivered.
    pub frames: usize,
    /// Outcome of every settle that completed, in order.
    pub outcomes: Vec<Outcome>,
}

impl ReplayReport {
    /// Number of committed gestures.
    pub fn commits(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| **o == Outcome::Commit)
            .count()
    }

    /// Number of cancelled gestures.
    pub fn cancels(&self) -> usize {
        self.outcomes.len() - self.commits()
    }
}

/// Drive `controller` over `events` against `host`.
///
/// Timestamps that go backwards are treated as equal to the latest seen.
/// Frames whose time would overflow `u64` are not delivered; a settle that
/// needs them is left running and reported with a warning.
pub fn replay<H: WindowHost + ?Sized>(
    controller: &mut SwipeController,
    host: &mut H,
    events: &[TimedEvent],
    frame_interval_ms: u64,
) -> ReplayReport {
    let interval = frame_interval_ms.max(1);
    let mut report = ReplayReport::default();
    let mut next_frame: Option<u64> = None;
    let mut clock = 0;

    for timed in events {
        clock = clock.max(timed.at_ms);
        while let Some(at) = next_frame.filter(|at| *at <= clock) {
            next_frame = deliver_frame(controller, host, at, interval, &mut report);
        }

        report.events += 1;
        match controller.handle_pointer(host, &timed.event) {
            Some(GestureSignal::Begin { .. }) => report.begins += 1,
            Some(GestureSignal::Delta { .. }) => report.deltas += 1,
            Some(GestureSignal::End) => report.ends += 1,
            None => {}
        }

        if next_frame.is_none() && controller.is_settling() {
            next_frame = next_frame_time(clock, interval);
        }
    }

    while let Some(at) = next_frame {
        next_frame = deliver_frame(controller, host, at, interval, &mut report);
    }

    if controller.is_settling() {
        warn!(clock, "frame clock exhausted before the settle animation completed");
    }
    debug!(?report, "replay finished");
    report
}

fn deliver_frame<H: WindowHost + ?Sized>(
    controller: &mut SwipeController,
    host: &mut H,
    at: u64,
    interval: u64,
    report: &mut ReplayReport,
) -> Option<u64> {
    report.frames += 1;
    if let Some(outcome) = controller.on_frame(host, at) {
        report.outcomes.push(outcome);
    }
    if controller.is_settling() {
        next_frame_time(at, interval)
    } else {
        None
    }
}

fn next_frame_time(at: u64, interval: u64) -> Option<u64> {
    let next = at.checked_add(interval);
    if next.is_none() {
        warn!(at, interval, "next frame time overflows; stopping frame delivery");
    }
    next
}

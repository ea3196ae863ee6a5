//! Entry point the host wires its two callback paths into.
//!
//! Pointer events go to [`SwipeController::handle_pointer`], animation frames
//! to [`SwipeController::on_frame`]. Both must be called from the same control
//! thread; neither blocks.

use crate::config::Tuning;
use crate::host::{SurfaceApi, WindowHost};
use crate::model::{DisplayId, PointerEvent};
use crate::state::gesture::{GestureSignal, GestureTracker};
use crate::state::session::{MigrationSession, Outcome, PhaseKind, SessionSnapshot};
use tracing::warn;

/// Two-finger swipe migration for one origin display.
#[derive(Debug)]
pub struct SwipeController {
    tracker: GestureTracker,
    session: MigrationSession,
}

impl SwipeController {
    /// Controller for gestures performed on `origin_display`.
    pub fn new(origin_display: DisplayId, tuning: Tuning) -> Self {
        Self {
            tracker: GestureTracker::new(tuning.scroll_threshold),
            session: MigrationSession::new(origin_display, tuning),
        }
    }

    /// Feed one pointer event through the tracker into the session.
    ///
    /// Returns the tracker's signal, if any, for diagnostics.
    pub fn handle_pointer<H: WindowHost + ?Sized>(
        &mut self,
        host: &mut H,
        event: &PointerEvent,
    ) -> Option<GestureSignal> {
        let was_tracking = self.tracker.is_tracking();
        let signal = self.tracker.process(event);

        match signal {
            Some(GestureSignal::Begin { .. }) => {
                if let Err(refusal) = self.session.begin(host) {
                    warn!(%refusal, "migration refused");
                }
            }
            Some(GestureSignal::Delta { primary, .. }) => self.session.drag(host, primary),
            Some(GestureSignal::End) => self.session.release(host),
            None if was_tracking && !self.tracker.is_tracking() => {
                // Released without ever dragging.
                self.session.abandon(host);
            }
            None => {}
        }

        signal
    }

    /// Deliver an animation frame stamped `now_ms`.
    pub fn on_frame<H: WindowHost + ?Sized>(&mut self, host: &mut H, now_ms: u64) -> Option<Outcome> {
        self.session.frame(host, now_ms)
    }

    /// True while a released gesture is animating and needs frames.
    pub fn is_settling(&self) -> bool {
        self.session.phase() == PhaseKind::Settling
    }

    /// Current session state.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    /// See [`MigrationSession::origin_live`].
    pub fn origin_live<S: SurfaceApi + ?Sized>(&self, host: &S) -> bool {
        self.session.origin_live(host)
    }

    /// The gesture recognizer.
    pub fn tracker(&self) -> &GestureTracker {
        &self.tracker
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;

//! Two-finger horizontal drag recognition.
//!
//! [`GestureTracker`] turns raw [`PointerEvent`]s into at most one
//! [`GestureSignal`] per event. It knows nothing about surfaces or displays.
//!
//! # State Machine
//!
//! ```text
//! Idle ──down(count=2)──▶ Tracking ──move(|dx0| >= threshold)──▶ Dragging
//!   ▲                        │                                      │
//!   └──── up (silent) ───────┘◀───────────── up (End) ──────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. Baselines only advance when a `Delta` fires; sub-threshold jitter is
//!    absorbed, so several small moves can add up to one `Delta`.
//! 2. `End` is emitted at most once per `Begin`, and only if a `Delta` was.
//! 3. Pointer A's displacement alone decides whether a move qualifies.

use crate::model::{PointerEvent, PointerId, PointerKind};
use tracing::debug;

/// Output of the tracker for a single pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureSignal {
    /// Two contacts are down.
    Begin {
        /// Primary contact, the first in the event.
        id_a: PointerId,
        /// Secondary contact.
        id_b: PointerId,
        /// Starting x of the primary contact.
        x_a: f32,
        /// Starting x of the secondary contact.
        x_b: f32,
    },
    /// Qualifying horizontal movement since the last `Delta` (or `Begin`).
    Delta {
        /// Displacement of the primary contact; drives the drag.
        primary: f32,
        /// Displacement of the secondary contact; informational.
        secondary: f32,
    },
    /// A latched contact lifted after at least one `Delta`.
    End,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Contact {
    id: PointerId,
    last_x: f32,
}

/// Stateful two-finger drag recognizer.
#[derive(Debug, Clone)]
pub struct GestureTracker {
    threshold: f32,
    a: Option<Contact>,
    b: Option<Contact>,
    dragging: bool,
}

impl GestureTracker {
    /// `threshold` is the minimum |dx| of pointer A (px) for a move to count.
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            a: None,
            b: None,
            dragging: false,
        }
    }

    /// True between a `Begin` and the release that ends it.
    pub fn is_tracking(&self) -> bool {
        self.a.is_some() || self.b.is_some()
    }

    /// True once a `Delta` has been emitted for the current contact pair.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Process one raw pointer event.
    pub fn process(&mut self, event: &PointerEvent) -> Option<GestureSignal> {
        match event.kind {
            PointerKind::Down => self.on_down(event),
            PointerKind::Move => self.on_move(event),
            PointerKind::Up => self.on_up(event),
        }
    }

    /// Return to idle without emitting anything.
    pub fn reset(&mut self) {
        self.a = None;
        self.b = None;
        self.dragging = false;
    }

    fn on_down(&mut self, event: &PointerEvent) -> Option<GestureSignal> {
        let [first, second] = event.pointers.as_slice() else {
            debug!(
                pointer_count = event.pointer_count(),
                "ignoring down: not a two-finger contact"
            );
            return None;
        };

        self.a = Some(Contact {
            id: first.id,
            last_x: first.x,
        });
        self.b = Some(Contact {
            id: second.id,
            last_x: second.x,
        });
        self.dragging = false;

        Some(GestureSignal::Begin {
            id_a: first.id,
            id_b: second.id,
            x_a: first.x,
            x_b: second.x,
        })
    }

    fn on_move(&mut self, event: &PointerEvent) -> Option<GestureSignal> {
        if event.pointer_count() != 2 {
            return None;
        }
        let (Some(a), Some(b)) = (self.a.as_mut(), self.b.as_mut()) else {
            return None;
        };
        let (Some(x_a), Some(x_b)) = (event.x_of(a.id), event.x_of(b.id)) else {
            debug!("ignoring move: latched pointers missing from event");
            return None;
        };

        let dx0 = x_a - a.last_x;
        let dx1 = x_b - b.last_x;
        if dx0.abs() < self.threshold {
            return None;
        }

        debug!(dx0, dx1, last_x_a = a.last_x, last_x_b = b.last_x, "drag delta");
        a.last_x += dx0;
        b.last_x += dx1;
        self.dragging = true;
        Some(GestureSignal::Delta {
            primary: dx0,
            secondary: dx1,
        })
    }

    fn on_up(&mut self, event: &PointerEvent) -> Option<GestureSignal> {
        let is_latched = |c: &Option<Contact>| c.is_some_and(|c| c.id == event.actor);
        if !is_latched(&self.a) && !is_latched(&self.b) {
            return None;
        }

        let dragged = self.dragging;
        debug!(actor = %event.actor, dragged, "latched pointer lifted");
        self.reset();
        dragged.then_some(GestureSignal::End)
    }
}

#[cfg(test)]
#[path = "gesture_tests.rs"]
mod tests;

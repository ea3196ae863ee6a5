//! Raw touch input as delivered by the input dispatcher.

use crate::model::PointerId;
use serde::{Deserialize, Serialize};

/// What happened to the acting pointer.
///
/// First-contact and additional-contact downs are not distinguished: the
/// tracker only cares about the pointer count after the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    /// A contact touched down.
    Down,
    /// One or more contacts moved.
    Move,
    /// A contact lifted.
    Up,
}

/// Position of one contact at the time of the event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    /// Contact identity.
    pub id: PointerId,
    /// Horizontal position in display pixels.
    pub x: f32,
    /// Vertical position; the gesture ignores it.
    #[serde(default)]
    pub y: f32,
}

impl PointerSample {
    /// Sample for contact `id` at `(x, y)`.
    pub fn new(id: u32, x: f32, y: f32) -> Self {
        Self {
            id: PointerId::new(id),
            x,
            y,
        }
    }
}

/// One multi-touch event.
///
/// `pointers` lists every contact that is down during the event, including
/// the acting pointer of an `Up` (it is lifted after this event).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// What happened.
    pub kind: PointerKind,
    /// Pointer that went down, moved or lifted.
    pub actor: PointerId,
    /// Every contact down during the event.
    pub pointers: Vec<PointerSample>,
}

impl PointerEvent {
    /// Event of `kind` acted on by pointer `actor`.
    pub fn new(kind: PointerKind, actor: u32, pointers: Vec<PointerSample>) -> Self {
        Self {
            kind,
            actor: PointerId::new(actor),
            pointers,
        }
    }

    /// Number of contacts down during the event.
    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    /// Horizontal coordinate of `id`, if that contact is part of this event.
    pub fn x_of(&self, id: PointerId) -> Option<f32> {
        self.pointers.iter().find(|p| p.id == id).map(|p| p.x)
    }
}

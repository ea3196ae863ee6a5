//! Surface transactions.
//!
//! A [`Transaction`] is an owned, ordered batch of surface operations bound to
//! one display. It does nothing until handed to [`super::SurfaceApi::apply`].

use crate::model::{DisplayId, SurfaceHandle};
use serde::Serialize;

/// One operation inside a transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SurfaceOp {
    /// Attach `surface` under `parent`.
    Reparent {
        /// Surface being moved in the tree.
        surface: SurfaceHandle,
        /// New parent layer.
        parent: SurfaceHandle,
    },
    /// Place `surface` at `(x, y)` relative to its parent.
    SetPosition {
        /// Surface being positioned.
        surface: SurfaceHandle,
        /// Horizontal position in pixels.
        x: f32,
        /// Vertical position in pixels.
        y: f32,
    },
    /// Detach and destroy `surface`.
    Remove {
        /// Surface being removed.
        surface: SurfaceHandle,
    },
}

/// Ordered batch of surface operations for a single display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[must_use = "a transaction has no effect until applied"]
pub struct Transaction {
    display: DisplayId,
    ops: Vec<SurfaceOp>,
}

impl Transaction {
    /// Start an empty transaction on `display`'s pending queue.
    pub fn on(display: DisplayId) -> Self {
        Self {
            display,
            ops: Vec::new(),
        }
    }

    /// Append a reparent of `surface` under `parent`.
    pub fn reparent(mut self, surface: &SurfaceHandle, parent: &SurfaceHandle) -> Self {
        self.ops.push(SurfaceOp::Reparent {
            surface: surface.clone(),
            parent: parent.clone(),
        });
        self
    }

    /// Append a position change for `surface`.
    pub fn set_position(mut self, surface: &SurfaceHandle, x: f32, y: f32) -> Self {
        self.ops.push(SurfaceOp::SetPosition {
            surface: surface.clone(),
            x,
            y,
        });
        self
    }

    /// Append the removal of `surface`.
    pub fn remove(mut self, surface: &SurfaceHandle) -> Self {
        self.ops.push(SurfaceOp::Remove {
            surface: surface.clone(),
        });
        self
    }

    /// Display whose queue this transaction targets.
    pub fn display(&self) -> DisplayId {
        self.display
    }

    /// Operations in the order they will be applied.
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// True if no operation was added.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_keeps_operation_order() {
        let mirror = SurfaceHandle::new(5);
        let layer = SurfaceHandle::new(1);
        let txn = Transaction::on(DisplayId::new(1))
            .reparent(&mirror, &layer)
            .set_position(&mirror, -1440.0, 0.0);

        assert_eq!(txn.display(), DisplayId::new(1));
        assert_eq!(
            txn.ops(),
            &[
                SurfaceOp::Reparent {
                    surface: mirror.clone(),
                    parent: layer,
                },
                SurfaceOp::SetPosition {
                    surface: mirror,
                    x: -1440.0,
                    y: 0.0,
                },
            ]
        );
    }

    #[test]
    fn new_transaction_is_empty() {
        assert!(Transaction::on(DisplayId::new(0)).is_empty());
    }

    #[test]
    fn ops_serialize_with_tag() {
        let txn = Transaction::on(DisplayId::new(0)).remove(&SurfaceHandle::new(9));
        let json = serde_json::to_string(txn.ops()).expect("serialize");
        assert_eq!(json, r#"[{"op":"remove","surface":9}]"#);
    }
}

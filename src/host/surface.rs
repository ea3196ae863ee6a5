//! Ownership wrappers for the two surfaces a migration touches.
//!
//! - [`OriginSurface`] is borrowed from the window system. The window can be
//!   torn down at any moment, so its handle is only reachable through
//!   [`OriginSurface::live`], which asks the host first.
//! - [`MirrorSurface`] is created by us and must be given back through
//!   [`MirrorSurface::release`], which consumes it.

use super::{SurfaceApi, Transaction};
use crate::model::{DisplayId, SurfaceHandle};
use tracing::{debug, warn};

/// Non-owning reference to a live window surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginSurface {
    handle: SurfaceHandle,
    display: DisplayId,
}

impl OriginSurface {
    /// Wrap a window surface shown on `display` without taking ownership.
    pub fn borrow(handle: SurfaceHandle, display: DisplayId) -> Self {
        Self { handle, display }
    }

    /// Display whose transaction queue positions this surface.
    pub fn display(&self) -> DisplayId {
        self.display
    }

    /// Whether the host still reports the surface valid.
    pub fn is_live<S: SurfaceApi + ?Sized>(&self, host: &S) -> bool {
        host.is_valid(&self.handle)
    }

    /// The handle, if the host still reports it valid.
    pub fn live<S: SurfaceApi + ?Sized>(&self, host: &S) -> Option<&SurfaceHandle> {
        if host.is_valid(&self.handle) {
            Some(&self.handle)
        } else {
            warn!(surface = %self.handle, "origin surface is no longer valid");
            None
        }
    }

    /// Set the horizontal position in its own transaction, if still alive.
    ///
    /// Returns whether the transaction was applied.
    pub fn move_to<S: SurfaceApi + ?Sized>(&self, host: &mut S, x: f32) -> bool {
        let Some(handle) = self.live(&*host) else {
            return false;
        };
        host.apply(Transaction::on(self.display).set_position(handle, x, 0.0));
        true
    }
}

/// A mirror we allocated and must remove again.
#[derive(Debug)]
#[must_use = "a mirror surface must be released"]
pub struct MirrorSurface {
    handle: SurfaceHandle,
    display: DisplayId,
    released: bool,
}

impl MirrorSurface {
    /// Mirror `source` and park the copy under `layer` of `target` at `(x, 0)`.
    ///
    /// Returns `None` if the compositor refuses to create the mirror.
    pub fn attach<S: SurfaceApi + ?Sized>(
        host: &mut S,
        source: &SurfaceHandle,
        target: DisplayId,
        layer: &SurfaceHandle,
        x: f32,
    ) -> Option<Self> {
        let handle = host.mirror(source)?;
        host.apply(
            Transaction::on(target)
                .reparent(&handle, layer)
                .set_position(&handle, x, 0.0),
        );
        debug!(mirror = %handle, source = %source, %target, "mirror attached");
        Some(Self {
            handle,
            display: target,
            released: false,
        })
    }

    /// Handle of the mirror surface.
    pub fn handle(&self) -> &SurfaceHandle {
        &self.handle
    }

    /// Display the mirror is parented on.
    pub fn display(&self) -> DisplayId {
        self.display
    }

    /// Remove the mirror from its display.
    ///
    /// A mirror the host already invalidated needs no removal.
    pub fn release<S: SurfaceApi + ?Sized>(mut self, host: &mut S) {
        if host.is_valid(&self.handle) {
            host.apply(Transaction::on(self.display).remove(&self.handle));
            debug!(mirror = %self.handle, display = %self.display, "mirror removed");
        } else {
            warn!(mirror = %self.handle, "mirror already invalid at release");
        }
        self.released = true;
    }
}

impl Drop for MirrorSurface {
    fn drop(&mut self) {
        if !self.released {
            warn!(mirror = %self.handle, "mirror surface dropped without release");
        }
    }
}

#[cfg(test)]
#[path = "surface_tests.rs"]
mod tests;

//! Core identifier newtypes.
//!
//! Every id handed to us by the window host is wrapped so that a task id can
//! never be passed where a display id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! id_newtype {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Wrap a raw id from the host.
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            /// The raw id.
            pub const fn get(self) -> u32 {
                self.0
            }
        }

        impl From<u32> for $name {
            fn from(raw: u32) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

id_newtype!(
    /// Identifier of one touch contact, stable for the contact's lifetime.
    PointerId,
    "pointer"
);

id_newtype!(
    /// Identifier of a task (the unit that migrates between displays).
    TaskId,
    "task"
);

id_newtype!(
    /// Identifier of a physical or virtual display.
    DisplayId,
    "display"
);

id_newtype!(
    /// Identifier of an activity whose visibility can be toggled.
    ActivityId,
    "activity"
);

/// Opaque reference to a compositor surface.
///
/// Not `Copy`: the ownership wrappers in [`crate::host`] decide
/// who may hold one and for how long.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurfaceHandle(u64);

impl SurfaceHandle {
    /// Wrap a raw compositor handle.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw handle.
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SurfaceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

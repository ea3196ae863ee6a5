//! dualswipe
//!
//! Two-finger horizontal swipe that drags the focused task off its display
//! and, past a commit distance, migrates it to a second display.
//!
//! The core ([`state`]) is pure state machines driven by pointer events and
//! frame callbacks. Everything it does to the outside world goes through the
//! traits in [`host`]; [`sim`] implements them in memory so recorded traces
//! can be replayed offline by the `dualswipe` binary.

pub mod config;
pub mod constants;
pub mod host;
pub mod logging;
pub mod model;
pub mod parser;
pub mod replay;
pub mod sim;
pub mod source;
pub mod state;

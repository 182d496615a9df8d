//! Core load-state types and logic.
//!
//! This module contains the pure part of the list controller:
//! - Load flags via the immutable `LoadState` value
//! - Display-state derivation from item presence and load flags
//! - Guard predicates for the start gate
//! - Bounded display-transition history
//!
//! Nothing here performs I/O or calls back into the caller.

mod display;
mod error;
mod guard;
mod history;
mod state;

pub use display::DisplayState;
pub use error::{Classify, ErrorClass};
pub use guard::Guard;
pub use history::{LoadEvent, StateHistory, StateTransition, DEFAULT_HISTORY_LIMIT};
pub use state::{LoadPhase, LoadState, State};

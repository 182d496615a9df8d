//! Load-state values tracked by the list controller.
//!
//! All types here are plain immutable values. The controller never mutates a
//! `LoadState` in place; each event produces a new value that replaces the old
//! one wholesale.

use super::error::ErrorClass;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for state machine states.
///
/// All methods are pure - no side effects. States represent immutable
/// values that describe the current position in a state machine.
///
/// # Required Traits
///
/// - `Clone`: States must be cloneable for history tracking
/// - `PartialEq`: States must be comparable for transition logic
/// - `Debug`: States must be debuggable for diagnostics
/// - `Serialize` + `Deserialize`: States must be serializable for diagnostics dumps
///
/// # Example
///
/// ```rust
/// use listload::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum SyncState {
///     Waiting,
///     Syncing,
///     Broken,
/// }
///
/// impl State for SyncState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Waiting => "Waiting",
///             Self::Syncing => "Syncing",
///             Self::Broken => "Broken",
///         }
///     }
///
///     fn is_error(&self) -> bool {
///         matches!(self, Self::Broken)
///     }
/// }
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this is an error state.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

/// Outcome of the most recent load transition.
///
/// Exactly one phase holds at any instant, so "loading" and a terminal outcome
/// can never be observed together.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum LoadPhase {
    /// No load has started yet.
    #[default]
    Idle,
    /// One accepted operation is in flight.
    Loading,
    /// The last operation completed with a result.
    Succeeded,
    /// The last operation failed with an error of the given class.
    Failed(ErrorClass),
}

impl State for LoadPhase {
    fn name(&self) -> &str {
        match self {
            Self::Idle => "Idle",
            Self::Loading => "Loading",
            Self::Succeeded => "Succeeded",
            Self::Failed(_) => "Failed",
        }
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed(_))
    }

    fn is_error(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Snapshot of the controller's load flags.
///
/// `is_error` is stored separately from the phase because a successful
/// completion may still carry an unsuccessful envelope (see
/// [`LoadState::succeeded`]).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct LoadState {
    phase: LoadPhase,
    is_error: bool,
    has_more: bool,
}

impl Default for LoadState {
    fn default() -> Self {
        Self::new(true)
    }
}

impl LoadState {
    /// Idle state with the given initial pagination flag.
    ///
    /// ```rust
    /// use listload::core::{LoadPhase, LoadState};
    ///
    /// let state = LoadState::new(true);
    /// assert_eq!(state.phase(), LoadPhase::Idle);
    /// assert!(!state.is_loading());
    /// assert!(!state.is_error());
    /// assert!(state.has_more());
    /// ```
    pub fn new(has_more: bool) -> Self {
        Self {
            phase: LoadPhase::Idle,
            is_error: false,
            has_more,
        }
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// State after an accepted start. Clears the error flag.
    pub fn loading(self) -> Self {
        Self {
            phase: LoadPhase::Loading,
            is_error: false,
            has_more: self.has_more,
        }
    }

    /// State after a completed fetch.
    ///
    /// `envelope_ok` is the result's own success flag; an unsuccessful
    /// envelope leaves the controller in `Succeeded` with `is_error` raised.
    pub fn succeeded(self, envelope_ok: bool, has_more: bool) -> Self {
        Self {
            phase: LoadPhase::Succeeded,
            is_error: !envelope_ok,
            has_more,
        }
    }

    /// State after the in-flight operation was cancelled without a result.
    pub fn idle(self) -> Self {
        Self {
            phase: LoadPhase::Idle,
            is_error: self.is_error,
            has_more: self.has_more,
        }
    }

    /// State after a failed fetch. Pagination flag is left as it was.
    pub fn failed(self, class: ErrorClass) -> Self {
        Self {
            phase: LoadPhase::Failed(class),
            is_error: true,
            has_more: self.has_more,
        }
    }
}

impl State for LoadState {
    fn name(&self) -> &str {
        self.phase.name()
    }

    fn is_final(&self) -> bool {
        self.phase.is_final()
    }

    fn is_error(&self) -> bool {
        self.is_error
    }
}

//! Visible mode of a list screen.

use super::error::ErrorClass;
use super::state::{LoadPhase, LoadState, State};
use serde::{Deserialize, Serialize};

/// The single visible UI mode for a list screen.
///
/// Never stored by the controller: it is recomputed from item presence and
/// the current [`LoadState`] whenever it is needed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum DisplayState {
    Progress,
    Content,
    Empty,
    NetworkError,
}

impl State for DisplayState {
    fn name(&self) -> &str {
        match self {
            Self::Progress => "Progress",
            Self::Content => "Content",
            Self::Empty => "Empty",
            Self::NetworkError => "NetworkError",
        }
    }

    fn is_error(&self) -> bool {
        matches!(self, Self::NetworkError)
    }
}

impl DisplayState {
    /// Derive the display state from item presence and load flags.
    ///
    /// Any items at all win: the content stays visible while loading and after
    /// failures. Without items the phase decides.
    ///
    /// ```rust
    /// use listload::core::{DisplayState, ErrorClass, LoadState};
    ///
    /// let loading = LoadState::default().loading();
    /// assert_eq!(DisplayState::resolve(false, &loading), DisplayState::Progress);
    /// assert_eq!(DisplayState::resolve(true, &loading), DisplayState::Content);
    ///
    /// let offline = loading.failed(ErrorClass::Network);
    /// assert_eq!(DisplayState::resolve(false, &offline), DisplayState::NetworkError);
    /// ```
    pub fn resolve(has_items: bool, state: &LoadState) -> Self {
        if has_items {
            return Self::Content;
        }
        match state.phase() {
            LoadPhase::Loading => Self::Progress,
            LoadPhase::Failed(ErrorClass::Network) => Self::NetworkError,
            LoadPhase::Idle | LoadPhase::Succeeded | LoadPhase::Failed(ErrorClass::Other) => {
                Self::Empty
            }
        }
    }

    /// Display state for a failure on an empty list.
    pub fn for_failure(class: ErrorClass) -> Self {
        match class {
            ErrorClass::Network => Self::NetworkError,
            ErrorClass::Other => Self::Empty,
        }
    }

    /// Whether the view in this mode offers a retry affordance.
    pub fn offers_retry(&self) -> bool {
        matches!(self, Self::Empty | Self::NetworkError)
    }
}

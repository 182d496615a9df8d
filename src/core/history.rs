//! Display transition history.
//!
//! Every display notification the controller emits is recorded here with the
//! event that caused it, so a screen's visible behaviour can be inspected or
//! dumped after the fact.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Controller event that produced a transition.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum LoadEvent {
    Start,
    Success,
    Failure,
}

/// Record of a single state transition.
///
/// # Example
///
/// ```rust
/// use listload::core::{DisplayState, LoadEvent, StateTransition};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: DisplayState::Empty,
///     to: DisplayState::Progress,
///     timestamp: Utc::now(),
///     event: LoadEvent::Start,
/// };
/// assert!(!transition.is_unchanged());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
    /// The event that caused it
    pub event: LoadEvent,
}

impl<S: State> StateTransition<S> {
    /// `true` when the notification re-announced the current state.
    pub fn is_unchanged(&self) -> bool {
        self.from == self.to
    }
}

/// Ordered, bounded history of state transitions.
///
/// History is immutable - `record` returns a new history with the transition
/// added. Once `limit` entries are held, the oldest ones are dropped.
///
/// # Example
///
/// ```rust
/// use listload::core::{DisplayState, LoadEvent, StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let history = StateHistory::with_limit(8);
///
/// let history = history.record(StateTransition {
///     from: DisplayState::Empty,
///     to: DisplayState::Progress,
///     timestamp: Utc::now(),
///     event: LoadEvent::Start,
/// });
///
/// let history = history.record(StateTransition {
///     from: DisplayState::Progress,
///     to: DisplayState::Content,
///     timestamp: Utc::now(),
///     event: LoadEvent::Success,
/// });
///
/// let path = history.get_path();
/// assert_eq!(path.len(), 3); // Empty -> Progress -> Content
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
    limit: usize,
}

/// Default number of transitions kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 64;

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new empty history holding at most [`DEFAULT_HISTORY_LIMIT`] entries.
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// Create a new empty history holding at most `limit` entries.
    ///
    /// A limit of zero disables recording.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            transitions: Vec::new(),
            limit,
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// ```rust
    /// use listload::core::{DisplayState, LoadEvent, StateHistory, StateTransition};
    /// use chrono::Utc;
    ///
    /// let history = StateHistory::new();
    /// let new_history = history.record(StateTransition {
    ///     from: DisplayState::Progress,
    ///     to: DisplayState::NetworkError,
    ///     timestamp: Utc::now(),
    ///     event: LoadEvent::Failure,
    /// });
    /// assert_eq!(new_history.transitions().len(), 1);
    /// assert_eq!(history.transitions().len(), 0); // Original unchanged
    /// ```
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        if self.limit == 0 {
            return self.clone();
        }
        let skip = (self.transitions.len() + 1).saturating_sub(self.limit);
        let mut transitions: Vec<_> = self.transitions.iter().skip(skip).cloned().collect();
        transitions.push(transition);
        Self {
            transitions,
            limit: self.limit,
        }
    }

    /// Get the path of states traversed.
    ///
    /// Returns references to states in order: the `from` of the oldest
    /// retained transition, then the `to` state of each transition.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Duration between the first and last retained transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }

    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.last()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DisplayState;

    fn transition(
        from: DisplayState,
        to: DisplayState,
        event: LoadEvent,
    ) -> StateTransition<DisplayState> {
        StateTransition {
            from,
            to,
            timestamp: Utc::now(),
            event,
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<DisplayState> = StateHistory::new();
        assert_eq!(history.transitions().len(), 0);
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
        assert_eq!(history.limit(), DEFAULT_HISTORY_LIMIT);
    }

    #[test]
    fn record_is_immutable() {
        let history = StateHistory::new();

        let new_history = history.record(transition(
            DisplayState::Empty,
            DisplayState::Progress,
            LoadEvent::Start,
        ));

        assert_eq!(history.transitions().len(), 0);
        assert_eq!(new_history.transitions().len(), 1);
    }

    #[test]
    fn get_path_returns_state_sequence() {
        let history = StateHistory::new()
            .record(transition(
                DisplayState::Empty,
                DisplayState::Progress,
                LoadEvent::Start,
            ))
            .record(transition(
                DisplayState::Progress,
                DisplayState::Content,
                LoadEvent::Success,
            ));

        let path = history.get_path();
        assert_eq!(path.len(), 3);
        assert_eq!(path[0], &DisplayState::Empty);
        assert_eq!(path[1], &DisplayState::Progress);
        assert_eq!(path[2], &DisplayState::Content);
    }

    #[test]
    fn limit_drops_oldest_entries() {
        let mut history = StateHistory::with_limit(2);
        history = history.record(transition(
            DisplayState::Empty,
            DisplayState::Progress,
            LoadEvent::Start,
        ));
        history = history.record(transition(
            DisplayState::Progress,
            DisplayState::Content,
            LoadEvent::Success,
        ));
        history = history.record(transition(
            DisplayState::Content,
            DisplayState::Content,
            LoadEvent::Failure,
        ));

        assert_eq!(history.transitions().len(), 2);
        assert_eq!(history.transitions()[0].event, LoadEvent::Success);
        assert_eq!(history.last().map(|t| t.event), Some(LoadEvent::Failure));
    }

    #[test]
    fn zero_limit_records_nothing() {
        let history = StateHistory::with_limit(0).record(transition(
            DisplayState::Empty,
            DisplayState::Progress,
            LoadEvent::Start,
        ));

        assert!(history.transitions().is_empty());
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let start = Utc::now();
        let history = StateHistory::new().record(StateTransition {
            from: DisplayState::Empty,
            to: DisplayState::Progress,
            timestamp: start,
            event: LoadEvent::Start,
        });

        std::thread::sleep(std::time::Duration::from_millis(10));

        let history = history.record(transition(
            DisplayState::Progress,
            DisplayState::Empty,
            LoadEvent::Success,
        ));

        let duration = history.duration();
        assert!(duration.is_some());
        assert!(duration.unwrap() >= std::time::Duration::from_millis(10));
    }

    #[test]
    fn unchanged_transition_is_detected() {
        let t = transition(DisplayState::Content, DisplayState::Content, LoadEvent::Start);
        assert!(t.is_unchanged());
    }

    #[test]
    fn history_serializes_correctly() {
        let history = StateHistory::new().record(transition(
            DisplayState::Empty,
            DisplayState::NetworkError,
            LoadEvent::Failure,
        ));

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory<DisplayState> = serde_json::from_str(&json).unwrap();

        assert_eq!(
            history.transitions().len(),
            deserialized.transitions().len()
        );
        assert_eq!(deserialized.limit(), history.limit());
    }
}

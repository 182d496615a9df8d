//! Guard predicates for gating new loads.
//!
//! Guards are pure boolean functions over a state. The controller's start
//! gate is a `Guard<LoadState>`; callers can tighten it with [`Guard::and`].

use super::state::{LoadState, State};
use std::fmt;
use std::marker::PhantomData;

/// Pure predicate that determines if a transition can execute.
///
/// # Example
///
/// ```rust
/// use listload::core::{Guard, LoadState};
///
/// let gate = Guard::not_loading();
///
/// assert!(gate.check(&LoadState::default()));
/// assert!(!gate.check(&LoadState::default().loading()));
/// ```
pub struct Guard<S: State> {
    predicate: Box<dyn Fn(&S) -> bool + Send + Sync>,
    _phantom: PhantomData<S>,
}

impl<S: State> Guard<S> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be pure (deterministic, no side effects) and
    /// thread-safe (Send + Sync).
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
            _phantom: PhantomData,
        }
    }

    /// Check if the guard allows transition from this state.
    pub fn check(&self, state: &S) -> bool {
        (self.predicate)(state)
    }

    /// Guard that passes only when both `self` and `other` pass.
    ///
    /// `other` is not evaluated when `self` already rejects.
    pub fn and(self, other: Guard<S>) -> Self
    where
        S: 'static,
    {
        Guard::new(move |s: &S| self.check(s) && other.check(s))
    }
}

impl Guard<LoadState> {
    /// At-most-one-operation gate: rejects while a load is in flight.
    pub fn not_loading() -> Self {
        Guard::new(|s: &LoadState| !s.is_loading())
    }
}

impl<S: State> fmt::Debug for Guard<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ErrorClass;

    #[test]
    fn not_loading_rejects_in_flight() {
        let guard = Guard::not_loading();

        assert!(guard.check(&LoadState::default()));
        assert!(!guard.check(&LoadState::default().loading()));
        assert!(guard.check(&LoadState::default().loading().succeeded(true, true)));
        assert!(guard.check(&LoadState::default().loading().failed(ErrorClass::Other)));
    }

    #[test]
    fn and_requires_both() {
        let guard = Guard::not_loading().and(Guard::new(|s: &LoadState| s.has_more()));

        assert!(guard.check(&LoadState::new(true)));
        assert!(!guard.check(&LoadState::new(false)));
        assert!(!guard.check(&LoadState::new(true).loading()));
    }

    #[test]
    fn guard_is_deterministic() {
        let state = LoadState::default().loading();
        let guard = Guard::not_loading();

        let result1 = guard.check(&state);
        let result2 = guard.check(&state);

        assert_eq!(result1, result2);
    }

    #[test]
    fn guard_can_use_error_flag() {
        let guard = Guard::new(|s: &LoadState| !s.is_error());

        assert!(guard.check(&LoadState::default()));
        assert!(!guard.check(&LoadState::default().failed(ErrorClass::Network)));
    }
}

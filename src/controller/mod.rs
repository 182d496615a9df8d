//! List load controller.
//!
//! The controller owns the load flags of one list screen and turns the three
//! load events (start, success, failure) into display notifications. It is a
//! single-owner object: events arrive through `&mut self`, one at a time, on
//! whatever thread owns the screen.

mod items;
mod pending;
mod view;

pub use items::Items;
pub use pending::{CancelHandle, OperationId, PendingOperation};
pub use view::{ListView, RecordingView, ViewCall};

use crate::builder::LoadConfig;
use crate::core::{
    DisplayState, ErrorClass, Guard, LoadEvent, LoadState, StateHistory, StateTransition,
};
use chrono::Utc;
use std::fmt;
use tokio::sync::watch;

/// Merges a fetch result into the backing collection.
pub type MergeFn<C, T> = Box<dyn FnMut(&mut C, T, bool) + Send>;

/// Pure predicate over a fetch result.
pub type ResultPredicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Maps a fetch error to its display class.
pub type ClassifyFn<E> = Box<dyn Fn(&E) -> ErrorClass + Send + Sync>;

/// Reports a fetch error (logging, telemetry).
pub type ReportFn<E> = Box<dyn FnMut(&E) + Send>;

/// Caller-supplied steps the controller composes.
pub(crate) struct Strategies<C, T, E> {
    pub(crate) merge: MergeFn<C, T>,
    pub(crate) has_more: ResultPredicate<T>,
    pub(crate) success_flag: ResultPredicate<T>,
    pub(crate) classify: ClassifyFn<E>,
    pub(crate) report: ReportFn<E>,
}

/// Answer to a start request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartDecision {
    /// The candidate is now the active operation.
    Accepted(OperationId),
    /// The candidate was cancelled; nothing changed.
    Rejected,
}

impl StartDecision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    pub fn operation(&self) -> Option<OperationId> {
        match self {
            Self::Accepted(id) => Some(*id),
            Self::Rejected => None,
        }
    }
}

/// Load-state controller for one list screen.
///
/// `C` is the backing collection, `T` the fetch result, `E` the fetch error
/// and `V` the view. Build one with
/// [`ListLoadBuilder`](crate::builder::ListLoadBuilder).
pub struct ListLoadController<C, T, E, V> {
    state: LoadState,
    items: C,
    view: V,
    strategies: Strategies<C, T, E>,
    start_gate: Guard<LoadState>,
    pending: Option<PendingOperation>,
    history: StateHistory<DisplayState>,
    config: LoadConfig,
    loaded_once: bool,
    state_tx: watch::Sender<LoadState>,
}

impl<C, T, E, V> ListLoadController<C, T, E, V>
where
    C: Items,
    E: fmt::Display,
    V: ListView,
{
    pub(crate) fn from_parts(
        items: C,
        view: V,
        strategies: Strategies<C, T, E>,
        start_gate: Guard<LoadState>,
        config: LoadConfig,
    ) -> Self {
        let state = LoadState::new(config.initial_has_more);
        let (state_tx, _) = watch::channel(state);
        Self {
            state,
            items,
            view,
            strategies,
            start_gate,
            pending: None,
            history: StateHistory::with_limit(config.history_limit),
            config,
            loaded_once: false,
            state_tx,
        }
    }

    /// Current load flags.
    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn is_error(&self) -> bool {
        self.state.is_error()
    }

    pub fn has_more(&self) -> bool {
        self.state.has_more()
    }

    pub fn has_items(&self) -> bool {
        self.items.has_items()
    }

    /// Display state derived from the current items and flags.
    pub fn display_state(&self) -> DisplayState {
        DisplayState::resolve(self.items.has_items(), &self.state)
    }

    /// Whether a scroll trigger should ask for the next page now.
    ///
    /// False while loading, after a failure (retry is user-driven), once the
    /// last page was seen, and before the first load completes unless
    /// `load_more_before_first_page` is set.
    pub fn can_load_more(&self) -> bool {
        self.start_gate.check(&self.state)
            && !self.state.is_error()
            && self.state.has_more()
            && (self.loaded_once || self.config.load_more_before_first_page)
    }

    pub fn items(&self) -> &C {
        &self.items
    }

    /// Direct access to the collection, e.g. to drop a deleted row.
    ///
    /// Nothing is re-rendered; the next event derives the display from
    /// whatever the collection holds then.
    pub fn items_mut(&mut self) -> &mut C {
        &mut self.items
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn config(&self) -> &LoadConfig {
        &self.config
    }

    pub fn history(&self) -> &StateHistory<DisplayState> {
        &self.history
    }

    pub fn active_operation(&self) -> Option<OperationId> {
        self.pending.as_ref().map(PendingOperation::id)
    }

    /// Receiver that observes every replacement of the load flags.
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state_tx.subscribe()
    }

    /// Gate a new fetch before any work runs.
    ///
    /// A rejected candidate is cancelled here and nothing else changes. An
    /// accepted one becomes the active operation; the view gets either a
    /// status update (items visible) or the progress view, never both.
    pub fn begin(&mut self, candidate: PendingOperation) -> StartDecision {
        if !self.start_gate.check(&self.state) {
            tracing::debug!(
                operation = %candidate.id(),
                loading = self.state.is_loading(),
                "start rejected"
            );
            candidate.cancel();
            return StartDecision::Rejected;
        }

        let before = self.display_state();
        let id = candidate.id();
        tracing::debug!(operation = %id, is_refresh = candidate.is_refresh(), "load started");

        self.replace_state(self.state.loading());
        self.pending = Some(candidate);

        if self.items.has_items() {
            self.emit_status();
        } else {
            self.show(before, DisplayState::Progress, LoadEvent::Start);
        }

        StartDecision::Accepted(id)
    }

    /// Apply a successful fetch result.
    pub fn on_success(&mut self, result: T, is_refresh: bool) {
        let had_items = self.items.has_items();
        let before = DisplayState::resolve(had_items, &self.state);

        let envelope_ok = (self.strategies.success_flag)(&result);
        let has_more = (self.strategies.has_more)(&result);
        self.release(LoadEvent::Success);
        self.replace_state(self.state.succeeded(envelope_ok, has_more));
        self.loaded_once = true;

        if is_refresh && self.config.clear_on_refresh {
            self.items.clear_items();
        }
        (self.strategies.merge)(&mut self.items, result, is_refresh);

        let has_items = self.items.has_items();
        let display = if has_items {
            DisplayState::Content
        } else {
            DisplayState::Empty
        };
        self.show(before, display, LoadEvent::Success);

        if had_items || has_items {
            self.emit_status();
        }
    }

    /// Apply a failed fetch.
    ///
    /// The error is always reported. With items visible only a status update
    /// follows; otherwise the error class picks the network-error or empty view.
    pub fn on_failure(&mut self, error: E) {
        let has_items = self.items.has_items();
        let before = DisplayState::resolve(has_items, &self.state);
        let class = (self.strategies.classify)(&error);

        self.release(LoadEvent::Failure);
        self.replace_state(self.state.failed(class));

        (self.strategies.report)(&error);
        self.notify_error(&error.to_string());

        if has_items {
            self.emit_status();
            return;
        }

        self.show(before, DisplayState::for_failure(class), LoadEvent::Failure);
    }

    /// Cancel the active operation, if any, and leave the loading phase.
    ///
    /// Call when the screen goes away. No view notification is sent.
    /// Returns `true` if an operation was cancelled.
    pub fn teardown(&mut self) -> bool {
        let Some(op) = self.pending.take() else {
            return false;
        };
        tracing::debug!(operation = %op.id(), "operation cancelled on teardown");
        op.cancel();
        self.replace_state(self.state.idle());
        true
    }

    /// Drop the active operation when it ended without a result, e.g. the
    /// fetch task panicked.
    ///
    /// The state returns to idle and the view is brought back in line with
    /// the items: a status update when items are visible, otherwise the
    /// empty view. Returns `false` if nothing was in flight.
    pub fn abandon(&mut self, reason: &str) -> bool {
        let Some(op) = self.pending.take() else {
            return false;
        };
        tracing::error!(operation = %op.id(), reason, "operation abandoned");

        let has_items = self.items.has_items();
        let before = DisplayState::resolve(has_items, &self.state);
        self.replace_state(self.state.idle());
        self.notify_error(reason);

        if has_items {
            self.emit_status();
        } else {
            self.show(before, DisplayState::Empty, LoadEvent::Failure);
        }
        true
    }

    fn release(&mut self, event: LoadEvent) {
        match self.pending.take() {
            Some(op) => tracing::debug!(
                operation = %op.id(),
                elapsed = ?op.elapsed(),
                ?event,
                "operation settled"
            ),
            None => tracing::warn!(?event, "completion without an active operation"),
        }
    }

    fn replace_state(&mut self, next: LoadState) {
        self.state = next;
        self.state_tx.send_replace(next);
    }

    fn emit_status(&mut self) {
        if self.view.is_attached() {
            self.view.on_status_changed(&self.state);
        } else {
            tracing::trace!("view detached, status update skipped");
        }
    }

    fn notify_error(&mut self, message: &str) {
        if self.view.is_attached() {
            self.view.on_error(message);
        } else {
            tracing::trace!("view detached, error notification skipped");
        }
    }

    fn show(&mut self, from: DisplayState, to: DisplayState, event: LoadEvent) {
        tracing::trace!(from = ?from, to = ?to, ?event, "display");
        self.view.show(to);
        self.history = self.history.record(StateTransition {
            from,
            to,
            timestamp: Utc::now(),
            event,
        });
    }
}

impl<C, T, E, V> Drop for ListLoadController<C, T, E, V> {
    fn drop(&mut self) {
        if let Some(op) = self.pending.take() {
            tracing::debug!(operation = %op.id(), "operation cancelled on drop");
            op.cancel();
        }
    }
}

impl<C, T, E, V> fmt::Debug for ListLoadController<C, T, E, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListLoadController")
            .field("state", &self.state)
            .field("pending", &self.pending)
            .field("loaded_once", &self.loaded_once)
            .finish_non_exhaustive()
    }
}

//! Async driver that binds a controller to a fetch implementation.

use crate::controller::{
    Items, ListLoadController, ListView, OperationId, PendingOperation, StartDecision,
};
use crate::core::{DisplayState, LoadEvent};
use crate::error::LoadError;
use futures::future::{AbortHandle, Abortable, Aborted, BoxFuture};
use futures::FutureExt;
use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

/// Starts the domain call for one page. The flag is `true` for refreshes.
pub type FetchFn<T, E> = Arc<dyn Fn(bool) -> BoxFuture<'static, Result<T, E>> + Send + Sync>;

struct Completion<T, E> {
    id: OperationId,
    is_refresh: bool,
    outcome: Outcome<T, E>,
}

enum Outcome<T, E> {
    Finished(Result<T, E>),
    Panicked(String),
}

/// What a delivered completion did to the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settled {
    pub operation: OperationId,
    pub event: LoadEvent,
    pub display: DisplayState,
}

/// Runs fetches on a tokio runtime and feeds their results back to a
/// [`ListLoadController`] on the owner's side.
///
/// Fetch futures run on the runtime; their results come back over a channel
/// and are only applied when the owner calls [`settle`](Self::settle) or
/// [`try_settle`](Self::try_settle), so all controller events stay on one
/// linear sequence. A fetch future is spawned only after the controller
/// accepted it, and is aborted when the controller cancels it.
pub struct ListLoader<C, T, E, V> {
    controller: ListLoadController<C, T, E, V>,
    fetch: FetchFn<T, E>,
    runtime: Handle,
    tx: mpsc::UnboundedSender<Completion<T, E>>,
    rx: mpsc::UnboundedReceiver<Completion<T, E>>,
}

impl<C, T, E, V> ListLoader<C, T, E, V>
where
    C: Items,
    T: Send + 'static,
    E: fmt::Display + Send + 'static,
    V: ListView,
{
    /// Bind to the runtime of the calling context.
    pub fn new<F>(controller: ListLoadController<C, T, E, V>, fetch: F) -> Result<Self, LoadError>
    where
        F: Fn(bool) -> BoxFuture<'static, Result<T, E>> + Send + Sync + 'static,
    {
        let runtime = Handle::try_current()?;
        Ok(Self::with_runtime(controller, fetch, runtime))
    }

    pub fn with_runtime<F>(
        controller: ListLoadController<C, T, E, V>,
        fetch: F,
        runtime: Handle,
    ) -> Self
    where
        F: Fn(bool) -> BoxFuture<'static, Result<T, E>> + Send + Sync + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            controller,
            fetch: Arc::new(fetch),
            runtime,
            tx,
            rx,
        }
    }

    pub fn controller(&self) -> &ListLoadController<C, T, E, V> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut ListLoadController<C, T, E, V> {
        &mut self.controller
    }

    /// Load the first page again, replacing the collection on success.
    pub fn refresh(&mut self) -> StartDecision {
        self.start(true)
    }

    /// Load the next page, appending on success.
    pub fn load_more(&mut self) -> StartDecision {
        self.start(false)
    }

    /// Retry after a failure; wired to the empty and network-error views.
    pub fn retry(&mut self) -> StartDecision {
        self.start(false)
    }

    /// Scroll-trigger entry point: loads the next page only when
    /// [`can_load_more`](ListLoadController::can_load_more) allows it.
    pub fn load_more_if_ready(&mut self) -> Option<StartDecision> {
        if self.controller.can_load_more() {
            Some(self.start(false))
        } else {
            None
        }
    }

    fn start(&mut self, is_refresh: bool) -> StartDecision {
        let (abort, registration) = AbortHandle::new_pair();
        let decision = self
            .controller
            .begin(PendingOperation::new(is_refresh, abort));
        let StartDecision::Accepted(id) = decision else {
            return decision;
        };

        let future = (self.fetch)(is_refresh);
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let guarded = AssertUnwindSafe(Abortable::new(future, registration)).catch_unwind();
            let outcome = match guarded.await {
                Ok(Ok(result)) => Outcome::Finished(result),
                Ok(Err(Aborted)) => {
                    tracing::trace!(operation = %id, "fetch aborted");
                    return;
                }
                Err(payload) => Outcome::Panicked(panic_message(payload.as_ref())),
            };
            let completion = Completion {
                id,
                is_refresh,
                outcome,
            };
            if tx.send(completion).is_err() {
                tracing::trace!(operation = %id, "loader dropped, completion discarded");
            }
        });

        decision
    }

    /// Wait for the active operation to complete and apply its result.
    ///
    /// Returns [`LoadError::Idle`] when nothing is in flight.
    pub async fn settle(&mut self) -> Result<Settled, LoadError> {
        loop {
            if !self.controller.is_loading() {
                return Err(LoadError::Idle);
            }
            let Some(completion) = self.rx.recv().await else {
                return Err(LoadError::Idle);
            };
            if let Some(settled) = self.apply(completion) {
                return Ok(settled);
            }
        }
    }

    /// Apply a completion if one is already waiting. For polling event loops.
    pub fn try_settle(&mut self) -> Option<Settled> {
        while let Ok(completion) = self.rx.try_recv() {
            if let Some(settled) = self.apply(completion) {
                return Some(settled);
            }
        }
        None
    }

    /// Cancel the in-flight fetch. See [`ListLoadController::teardown`].
    pub fn teardown(&mut self) -> bool {
        self.controller.teardown()
    }

    fn apply(&mut self, completion: Completion<T, E>) -> Option<Settled> {
        if self.controller.active_operation() != Some(completion.id) {
            tracing::debug!(operation = %completion.id, "stale completion dropped");
            return None;
        }

        let event = match completion.outcome {
            Outcome::Finished(Ok(result)) => {
                self.controller.on_success(result, completion.is_refresh);
                LoadEvent::Success
            }
            Outcome::Finished(Err(error)) => {
                self.controller.on_failure(error);
                LoadEvent::Failure
            }
            Outcome::Panicked(message) => {
                self.controller.abandon(&format!("load interrupted: {}", message));
                LoadEvent::Failure
            }
        };

        Some(Settled {
            operation: completion.id,
            event,
            display: self.controller.display_state(),
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "fetch panicked".to_string()
    }
}

impl<C, T, E, V> fmt::Debug for ListLoader<C, T, E, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListLoader")
            .field("controller", &self.controller)
            .finish_non_exhaustive()
    }
}

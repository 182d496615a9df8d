//! The single in-flight fetch tracked by the controller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identity of one accepted fetch.
///
/// Completions carry the id of the operation that produced them, so a result
/// that arrives after its operation was cancelled can be told apart from the
/// current one.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct OperationId(Uuid);

impl OperationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for OperationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Something that can stop an asynchronous fetch.
///
/// Cancellation is cooperative: after `cancel` returns, the fetch must never
/// deliver its result. The runtime behind the handle owns that guarantee.
pub trait CancelHandle: Send {
    fn cancel(&mut self);
}

impl CancelHandle for futures::future::AbortHandle {
    fn cancel(&mut self) {
        self.abort();
    }
}

impl CancelHandle for tokio::task::AbortHandle {
    fn cancel(&mut self) {
        self.abort();
    }
}

impl<T: Send> CancelHandle for tokio::task::JoinHandle<T> {
    fn cancel(&mut self) {
        self.abort();
    }
}

/// Candidate or active fetch, as seen by the controller.
pub struct PendingOperation {
    id: OperationId,
    is_refresh: bool,
    started_at: DateTime<Utc>,
    handle: Box<dyn CancelHandle>,
}

impl PendingOperation {
    pub fn new<H>(is_refresh: bool, handle: H) -> Self
    where
        H: CancelHandle + 'static,
    {
        Self {
            id: OperationId::new(),
            is_refresh,
            started_at: Utc::now(),
            handle: Box::new(handle),
        }
    }

    pub fn id(&self) -> OperationId {
        self.id
    }

    pub fn is_refresh(&self) -> bool {
        self.is_refresh
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Time since the operation was created.
    pub fn elapsed(&self) -> std::time::Duration {
        Utc::now()
            .signed_duration_since(self.started_at)
            .to_std()
            .unwrap_or(std::time::Duration::ZERO)
    }

    /// Stop the underlying fetch and consume the operation.
    pub fn cancel(mut self) {
        self.handle.cancel();
    }
}

impl fmt::Debug for PendingOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingOperation")
            .field("id", &self.id)
            .field("is_refresh", &self.is_refresh)
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    struct Flag(Arc<AtomicBool>);

    impl CancelHandle for Flag {
        fn cancel(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    #[test]
    fn cancel_reaches_handle() {
        let cancelled = Arc::new(AtomicBool::new(false));
        let op = PendingOperation::new(true, Flag(Arc::clone(&cancelled)));

        assert!(op.is_refresh());
        op.cancel();

        assert!(cancelled.load(Ordering::SeqCst));
    }

    #[test]
    fn dropping_does_not_cancel() {
        let cancelled = Arc::new(AtomicBool::new(false));
        let op = PendingOperation::new(false, Flag(Arc::clone(&cancelled)));
        drop(op);

        assert!(!cancelled.load(Ordering::SeqCst));
    }

    #[test]
    fn operation_ids_are_unique() {
        let a = OperationId::new();
        let b = OperationId::new();
        assert_ne!(a, b);
        assert_eq!(a.to_string(), a.as_uuid().to_string());
    }

    #[test]
    fn abort_handle_cancels_future() {
        let (handle, registration) = futures::future::AbortHandle::new_pair();
        let op = PendingOperation::new(false, handle);
        op.cancel();

        let fut = futures::future::Abortable::new(futures::future::ready(1), registration);
        let result = futures::executor::block_on(fut);
        assert!(result.is_err());
    }
}

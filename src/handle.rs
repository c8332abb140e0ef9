//! Single-assignment result handle for one logical request.
//!
//! The orchestrator resolves the handle exactly once with one of three
//! terminal outcomes: a delivered response, an intentional drop, or a
//! fatal error. Any number of tasks may hold a clone and await the
//! outcome; "dropped" is a distinct non-error result, not a failure.

use std::sync::Arc;
use std::sync::OnceLock;

use tokio::sync::Notify;

use crate::invoke::InvocationError;

/// Terminal non-error outcome of a logical request.
#[derive(Debug)]
pub enum Delivery<R> {
    /// The remote endpoint answered with a successful response.
    Delivered(R),
    /// The request was intentionally given up after exhausting the
    /// bounded retry count for HTTP 500. Not a failure.
    Dropped,
}

/// What a logical request ultimately resolved to.
pub type InvocationOutcome<R> = Result<Delivery<R>, InvocationError>;

struct HandleInner<R> {
    slot: OnceLock<InvocationOutcome<R>>,
    resolved: Notify,
}

/// Awaitable single-assignment slot for a logical request's outcome.
///
/// Writers are crate-internal; the orchestrator's structure guarantees
/// a single resolution per request.
pub struct ResultHandle<R> {
    inner: Arc<HandleInner<R>>,
}

impl<R> Clone for ResultHandle<R> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<R> Default for ResultHandle<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> ResultHandle<R> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(HandleInner {
                slot: OnceLock::new(),
                resolved: Notify::new(),
            }),
        }
    }

    /// Wait until the logical request resolves. Safe to call from any
    /// number of tasks concurrently; all observe the same outcome.
    pub async fn outcome(&self) -> &InvocationOutcome<R> {
        loop {
            // Register for the wakeup before checking the slot so a
            // resolution racing with this check is not missed.
            let notified = self.inner.resolved.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            if let Some(outcome) = self.inner.slot.get() {
                return outcome;
            }
            notified.await;
        }
    }

    /// Non-blocking probe; `None` while the request is still in flight.
    pub fn peek(&self) -> Option<&InvocationOutcome<R>> {
        self.inner.slot.get()
    }

    pub(crate) fn resolve_delivered(&self, response: R) {
        self.resolve(Ok(Delivery::Delivered(response)));
    }

    pub(crate) fn resolve_dropped(&self) {
        self.resolve(Ok(Delivery::Dropped));
    }

    pub(crate) fn resolve_failure(&self, error: InvocationError) {
        self.resolve(Err(error));
    }

    fn resolve(&self, outcome: InvocationOutcome<R>) {
        let placed = self.inner.slot.set(outcome).is_ok();
        debug_assert!(placed, "result handle resolved more than once");
        self.inner.resolved.notify_waiters();
    }
}

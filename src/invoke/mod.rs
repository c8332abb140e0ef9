//! Retry orchestration for one logical request.
//!
//! This module owns the lifecycle of a single remote-function
//! invocation: submit an attempt, classify the outcome, consult the
//! backoff policy, resubmit or resolve. Exactly one terminal outcome
//! (delivered, dropped, or failed) reaches the result handle.

mod classify;
mod error;
mod run;

pub use classify::{classify_response, is_retryable_status, Disposition, RETRYABLE_STATUS};
pub use error::{InvocationError, LastFailure};
pub use run::RetryingInvocation;

use std::sync::Arc;

use crate::metrics::RemoteInvocationMetrics;
use crate::shutdown::ShutdownSignal;
use crate::summary::RequestSummary;

/// Immutable per-request collaborators handed to the orchestrator at
/// construction and owned by it for the request's lifetime.
pub struct InvocationContext {
    /// Diagnostic summary included in failure logs.
    pub summary: RequestSummary,
    /// Sink for per-attempt latency and failure counts.
    pub metrics: Arc<dyn RemoteInvocationMetrics>,
    /// Point-in-time "is the process shutting down" query.
    pub shutdown: ShutdownSignal,
    /// Bounded retry count for HTTP 500; negative disables the bound
    /// and 500 behaves like any other retryable status.
    pub max_request_retries: i32,
}

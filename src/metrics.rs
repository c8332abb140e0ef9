//! Interface the retry layer needs from a metrics sink.

use std::time::Duration;

/// Per-endpoint invocation metrics. Implementations are shared across
/// concurrent logical requests and must be internally thread-safe.
pub trait RemoteInvocationMetrics: Send + Sync {
    /// A transport-level failure was observed (before any retry decision).
    fn record_invocation_failure(&self);

    /// Wall-clock duration of one physical attempt, success or failure.
    fn record_invocation_latency(&self, elapsed: Duration);
}

/// Sink that discards everything; useful when no metrics backend is wired.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMetrics;

impl RemoteInvocationMetrics for NoopMetrics {
    fn record_invocation_failure(&self) {}

    fn record_invocation_latency(&self, _elapsed: Duration) {}
}

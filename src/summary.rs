//! Human-readable summary of one logical request, carried into every
//! log line the retry layer emits about it.

use std::fmt;

/// Diagnostic summary of a logical request. Immutable for the lifetime
/// of the request; cheap enough to format on every failure log.
#[derive(Debug, Clone)]
pub struct RequestSummary {
    /// Target function, e.g. `"example/greeter"`.
    pub function: String,
    /// Number of invocations batched into this request.
    pub batch_size: usize,
    /// Serialized request size in bytes.
    pub total_size_bytes: usize,
    /// Number of persisted state entries attached to the request.
    pub state_count: usize,
}

impl RequestSummary {
    pub fn new(
        function: impl Into<String>,
        batch_size: usize,
        total_size_bytes: usize,
        state_count: usize,
    ) -> Self {
        Self {
            function: function.into(),
            batch_size,
            total_size_bytes,
            state_count,
        }
    }
}

impl fmt::Display for RequestSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (batch={}, bytes={}, states={})",
            self.function, self.batch_size, self.total_size_bytes, self.state_count
        )
    }
}

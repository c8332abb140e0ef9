//! Fatal outcomes of a logical request.

use std::fmt;
use std::io;
use std::time::Duration;

use thiserror::Error;

/// The last thing that went wrong before the time budget ran out.
#[derive(Debug)]
pub enum LastFailure {
    /// Transport-level failure (connection reset, timeout, ...).
    Transport(io::Error),
    /// Non-successful HTTP status code.
    Status(u16),
}

impl fmt::Display for LastFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LastFailure::Transport(e) => write!(f, "transport: {}", e),
            LastFailure::Status(code) => write!(f, "HTTP {}", code),
        }
    }
}

/// Fatal resolution of a logical request. Bounded-drop is deliberately
/// absent: dropping is a non-error outcome (`Delivery::Dropped`).
#[derive(Debug, Error)]
pub enum InvocationError {
    /// A transport failure arrived while the process was shutting
    /// down; retrying would race teardown of dependencies.
    #[error("transport failure during shutdown: {source}")]
    ShutdownInProgress {
        #[source]
        source: io::Error,
    },

    /// The backoff time budget ran out before an attempt succeeded.
    #[error("request time budget elapsed after {elapsed:.2?}; last failure: {last}")]
    BudgetExhausted { elapsed: Duration, last: LastFailure },

    /// A response below 500 and outside the retryable set.
    #[error("non-successful HTTP response code {status}")]
    NonRetryableStatus { status: u16 },
}

//! Interface the retry layer needs from an HTTP transport.
//!
//! The transport owns connections, TLS and timeouts; this layer only
//! submits attempts and classifies what comes back. Each submission
//! completes exactly once, with either a response or a transport-level
//! failure. Retrying means cloning the attempt and submitting again.

use std::future::Future;
use std::io;

/// One completed HTTP exchange as seen by the retry layer.
///
/// Implementations are expected to buffer the body before the
/// submission completes, so `body_text` can surface a stored read
/// error without further I/O. Dropping the response releases any
/// resources (connection, buffers) it still holds.
pub trait InvocationResponse {
    /// Numeric HTTP status code.
    fn status(&self) -> u16;

    /// Whether the response is 2xx-class.
    fn is_success(&self) -> bool {
        (200..300).contains(&self.status())
    }

    /// Body as text, best effort. `None` means the response had no
    /// body; `Err` means the body existed but could not be read.
    fn body_text(&self) -> io::Result<Option<String>>;
}

/// Asynchronous request transport.
///
/// `Attempt` is one physical submission of a logical request; cloning
/// it must yield a fresh, re-submittable copy (same method, path,
/// headers, body).
pub trait Transport: Send + Sync {
    type Attempt: Clone + Send;
    type Response: InvocationResponse + Send + Sync;

    /// Enqueue one attempt. Resolves exactly once, with either the
    /// response or the transport-level failure that ended the attempt.
    fn submit(
        &self,
        attempt: Self::Attempt,
    ) -> impl Future<Output = io::Result<Self::Response>> + Send;
}

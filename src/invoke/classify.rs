//! Classify HTTP status codes into terminal/retry dispositions.
//!
//! Kept pure so the retry policy is testable without a live transport:
//! the orchestrator feeds in the status code, the current bounded-500
//! attempt count, and the configured bound, and acts on the returned
//! disposition.

/// Status codes retried under plain backoff. 500 is additionally
/// subject to the bounded-drop count when one is configured.
pub const RETRYABLE_STATUS: [u16; 9] = [400, 408, 409, 420, 429, 499, 500, 503, 504];

/// Whether a status code is in the fixed retryable set. Drives the
/// warn-vs-error log level for non-successful responses; codes >= 500
/// outside the set are still retried (see [`classify_response`]).
pub fn is_retryable_status(status: u16) -> bool {
    RETRYABLE_STATUS.contains(&status)
}

/// What to do with one completed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// 2xx: resolve the logical request with this response.
    Success,
    /// Retry under the backoff budget.
    RetryTransient,
    /// Bounded HTTP-500 count exhausted: resolve as intentionally dropped.
    Dropped,
    /// Below 500 and not retryable: resolve as a failure, no retry.
    Fatal,
}

/// Classify a response status.
///
/// `drop_attempts` counts prior bounded-500 retries for this logical
/// request; `max_request_retries` enables the bound when non-negative.
/// Statuses >= 500 outside the retryable set fall through to the retry
/// path: all 5xx are treated as retryable.
pub fn classify_response(status: u16, drop_attempts: u32, max_request_retries: i32) -> Disposition {
    if (200..300).contains(&status) {
        return Disposition::Success;
    }

    if status == 500 && max_request_retries >= 0 {
        return if drop_attempts < max_request_retries as u32 {
            Disposition::RetryTransient
        } else {
            Disposition::Dropped
        };
    }

    if !is_retryable_status(status) && status < 500 {
        return Disposition::Fatal;
    }

    Disposition::RetryTransient
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_codes_resolve() {
        assert_eq!(classify_response(200, 0, -1), Disposition::Success);
        assert_eq!(classify_response(204, 0, 3), Disposition::Success);
    }

    #[test]
    fn retryable_set_retries() {
        for status in [400, 408, 409, 420, 429, 499, 503, 504] {
            assert_eq!(
                classify_response(status, 0, -1),
                Disposition::RetryTransient,
                "status {}",
                status
            );
        }
    }

    #[test]
    fn statuses_at_or_above_500_fall_through_to_retry() {
        assert_eq!(classify_response(502, 0, -1), Disposition::RetryTransient);
        assert_eq!(classify_response(599, 0, 3), Disposition::RetryTransient);
        // Not in the retryable set, still logged as non-retryable.
        assert!(!is_retryable_status(502));
    }

    #[test]
    fn non_retryable_below_500_is_fatal() {
        assert_eq!(classify_response(404, 0, -1), Disposition::Fatal);
        assert_eq!(classify_response(401, 0, 3), Disposition::Fatal);
        assert_eq!(classify_response(302, 0, -1), Disposition::Fatal);
    }

    #[test]
    fn bounded_500_retries_until_the_bound() {
        assert_eq!(classify_response(500, 0, 3), Disposition::RetryTransient);
        assert_eq!(classify_response(500, 2, 3), Disposition::RetryTransient);
        assert_eq!(classify_response(500, 3, 3), Disposition::Dropped);
        assert_eq!(classify_response(500, 7, 3), Disposition::Dropped);
    }

    #[test]
    fn zero_bound_drops_the_first_500() {
        assert_eq!(classify_response(500, 0, 0), Disposition::Dropped);
    }

    #[test]
    fn negative_bound_makes_500_plain_retryable() {
        assert_eq!(classify_response(500, 0, -1), Disposition::RetryTransient);
        assert_eq!(classify_response(500, 1000, -1), Disposition::RetryTransient);
    }
}

//! Driver loop: submit attempts until one terminal outcome is reached.

use std::io;
use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::{error, warn};

use crate::backoff::BoundedExponentialBackoff;
use crate::config::InvocationConfig;
use crate::handle::ResultHandle;
use crate::transport::{InvocationResponse, Transport};

use super::classify::{classify_response, is_retryable_status, Disposition};
use super::error::{InvocationError, LastFailure};
use super::InvocationContext;

/// Orchestrates all attempts of one logical request.
///
/// Attempts run strictly sequentially: a new submission happens only
/// after the previous one completed and the backoff wait elapsed. The
/// result handle is resolved exactly once, in [`RetryingInvocation::run`].
pub struct RetryingInvocation<T: Transport> {
    transport: T,
    attempt: T::Attempt,
    ctx: InvocationContext,
    backoff: BoundedExponentialBackoff,
    /// Counts only bounded HTTP-500 attempts, not backoff retries.
    drop_attempts: u32,
    handle: ResultHandle<T::Response>,
    request_started: Instant,
}

impl<T: Transport> RetryingInvocation<T> {
    /// Bind an orchestrator to one logical request. `time_budget` is
    /// the transport-level request timeout; it bounds total retry time.
    pub fn new(
        transport: T,
        attempt: T::Attempt,
        ctx: InvocationContext,
        time_budget: Duration,
    ) -> Self {
        Self {
            transport,
            attempt,
            ctx,
            backoff: BoundedExponentialBackoff::new(time_budget),
            drop_attempts: 0,
            handle: ResultHandle::new(),
            request_started: Instant::now(),
        }
    }

    /// Bind an orchestrator using a loaded endpoint configuration: the
    /// request timeout becomes the retry time budget and the backoff
    /// section supplies the delay tuning.
    pub fn from_config(
        transport: T,
        attempt: T::Attempt,
        ctx: InvocationContext,
        config: &InvocationConfig,
    ) -> Self {
        let backoff = BoundedExponentialBackoff::with_tuning(
            config.backoff.initial_delay(),
            config.backoff.growth_factor,
            config.backoff.jitter_ratio,
            config.request_timeout(),
        );
        Self::with_backoff(transport, attempt, ctx, backoff)
    }

    /// As [`new`](Self::new) but with explicit backoff tuning.
    pub fn with_backoff(
        transport: T,
        attempt: T::Attempt,
        ctx: InvocationContext,
        backoff: BoundedExponentialBackoff,
    ) -> Self {
        Self {
            transport,
            attempt,
            ctx,
            backoff,
            drop_attempts: 0,
            handle: ResultHandle::new(),
            request_started: Instant::now(),
        }
    }

    /// Handle observers await for the request's terminal outcome.
    pub fn handle(&self) -> ResultHandle<T::Response> {
        self.handle.clone()
    }

    /// Run the request to completion and resolve the handle.
    ///
    /// This is the single resolution point: every path through the
    /// driver returns exactly one terminal variant, so the handle is
    /// resolved exactly once no matter which branch ended the request.
    pub async fn run(mut self) {
        match self.drive().await {
            Ok(Terminal::Delivered(response)) => self.handle.resolve_delivered(response),
            Ok(Terminal::Dropped) => self.handle.resolve_dropped(),
            Err(err) => self.handle.resolve_failure(err),
        }
    }

    async fn drive(&mut self) -> Result<Terminal<T::Response>, InvocationError> {
        loop {
            let attempt_started = Instant::now();
            let completion = self.transport.submit(self.attempt.clone()).await;
            // Latency covers every physical attempt, success or failure,
            // and is recorded before any retry decision.
            let attempt_elapsed = attempt_started.elapsed();
            self.ctx.metrics.record_invocation_latency(attempt_elapsed);

            match completion {
                Err(cause) => {
                    if let Some(terminal) = self.on_transport_failure(cause, attempt_elapsed).await? {
                        return Ok(terminal);
                    }
                }
                Ok(response) => {
                    if let Some(terminal) = self.on_response(response).await? {
                        return Ok(terminal);
                    }
                }
            }
        }
    }

    /// Transport-level failure: fatal during shutdown, otherwise retry
    /// under the backoff budget. `Ok(None)` means "attempt resubmitted".
    async fn on_transport_failure(
        &mut self,
        cause: io::Error,
        attempt_elapsed: Duration,
    ) -> Result<Option<Terminal<T::Response>>, InvocationError> {
        if self.ctx.shutdown.is_shutting_down() {
            return Err(InvocationError::ShutdownInProgress { source: cause });
        }

        warn!(
            request = %self.ctx.summary,
            elapsed = ?attempt_elapsed,
            error = %cause,
            "retryable transport failure while delivering invocation"
        );
        self.ctx.metrics.record_invocation_failure();

        self.backoff_or_give_up(LastFailure::Transport(cause)).await
    }

    /// HTTP response: resolve on 2xx, drop on an exhausted 500 bound,
    /// fail on non-retryable codes below 500, retry everything else.
    async fn on_response(
        &mut self,
        response: T::Response,
    ) -> Result<Option<Terminal<T::Response>>, InvocationError> {
        let status = response.status();
        match classify_response(status, self.drop_attempts, self.ctx.max_request_retries) {
            Disposition::Success => Ok(Some(Terminal::Delivered(response))),
            Disposition::Dropped => {
                self.log_unsuccessful(&response);
                warn!(
                    request = %self.ctx.summary,
                    max_request_retries = self.ctx.max_request_retries,
                    "maximum number of bounded attempts exceeded, dropping invocation"
                );
                Ok(Some(Terminal::Dropped))
            }
            Disposition::Fatal => {
                self.log_unsuccessful(&response);
                Err(InvocationError::NonRetryableStatus { status })
            }
            Disposition::RetryTransient => {
                self.log_unsuccessful(&response);
                // Release the response before waiting out the backoff.
                drop(response);
                if status == 500 && self.ctx.max_request_retries >= 0 {
                    self.drop_attempts += 1;
                    warn!(
                        request = %self.ctx.summary,
                        attempt = self.drop_attempts,
                        max_request_retries = self.ctx.max_request_retries,
                        "failed bounded attempt, retrying"
                    );
                }
                self.backoff_or_give_up(LastFailure::Status(status)).await
            }
        }
    }

    /// Wait out the backoff delay, or surface budget exhaustion with
    /// the total elapsed time and the last failure cause.
    async fn backoff_or_give_up(
        &mut self,
        last: LastFailure,
    ) -> Result<Option<Terminal<T::Response>>, InvocationError> {
        match self.backoff.next_delay() {
            Some(delay) => {
                sleep(delay).await;
                Ok(None)
            }
            None => Err(InvocationError::BudgetExhausted {
                elapsed: self.request_started.elapsed(),
                last,
            }),
        }
    }

    /// Warn for retryable statuses, error for the rest, with the body
    /// text when it can be read. A body read failure only changes the
    /// log line, never the retry decision.
    fn log_unsuccessful(&self, response: &T::Response) {
        let status = response.status();
        let retryable = is_retryable_status(status);
        match response.body_text() {
            Ok(Some(body)) if retryable => warn!(
                request = %self.ctx.summary,
                status,
                body = %body,
                "non-successful, retryable HTTP response"
            ),
            Ok(Some(body)) => error!(
                request = %self.ctx.summary,
                status,
                body = %body,
                "non-successful, non-retryable HTTP response"
            ),
            Ok(None) if retryable => warn!(
                request = %self.ctx.summary,
                status,
                "non-successful, retryable HTTP response with empty body"
            ),
            Ok(None) => error!(
                request = %self.ctx.summary,
                status,
                "non-successful, non-retryable HTTP response with empty body"
            ),
            Err(read_err) if retryable => warn!(
                request = %self.ctx.summary,
                status,
                error = %read_err,
                "non-successful, retryable HTTP response; body could not be read"
            ),
            Err(read_err) => error!(
                request = %self.ctx.summary,
                status,
                error = %read_err,
                "non-successful, non-retryable HTTP response; body could not be read"
            ),
        }
    }
}

/// Terminal non-error outcome of the driver loop.
enum Terminal<R> {
    Delivered(R),
    Dropped,
}

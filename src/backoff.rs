//! Bounded exponential backoff with jitter.
//!
//! One instance governs all retry attempts of a single logical request.
//! The policy never sleeps itself: it hands the caller a delay to wait
//! (or `None` once the total time budget is spent) so the invoking task
//! can suspend with `tokio::time::sleep` instead of blocking a worker.

use std::time::Duration;

use rand::Rng;
use tokio::time::Instant;

/// Default initial delay between attempts.
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(1000);
/// Default multiplier applied to the delay after each granted wait.
pub const DEFAULT_GROWTH_FACTOR: f64 = 2.0;
/// Default jitter ratio: delays are drawn uniformly within ±10% of nominal.
pub const DEFAULT_JITTER_RATIO: f64 = 0.1;

/// Exponential backoff bounded by a total wall-clock time budget.
///
/// The budget covers the whole logical request: once the time elapsed
/// since construction plus the next candidate delay would pass the
/// budget, no further delay is granted, ever.
#[derive(Debug)]
pub struct BoundedExponentialBackoff {
    /// Nominal delay for the next granted wait (pre-jitter).
    next_delay: Duration,
    growth_factor: f64,
    jitter_ratio: f64,
    /// Absolute point past which no more waits are granted.
    deadline: Instant,
}

impl BoundedExponentialBackoff {
    /// Create a policy with an explicit time budget and default delay tuning.
    pub fn new(time_budget: Duration) -> Self {
        Self::with_tuning(
            DEFAULT_INITIAL_DELAY,
            DEFAULT_GROWTH_FACTOR,
            DEFAULT_JITTER_RATIO,
            time_budget,
        )
    }

    /// Create a policy with explicit tuning. `jitter_ratio` of 0 disables jitter.
    pub fn with_tuning(
        initial_delay: Duration,
        growth_factor: f64,
        jitter_ratio: f64,
        time_budget: Duration,
    ) -> Self {
        Self {
            next_delay: initial_delay,
            growth_factor: growth_factor.max(1.0),
            jitter_ratio: jitter_ratio.clamp(0.0, 1.0),
            deadline: Instant::now() + time_budget,
        }
    }

    /// Time remaining before the budget deadline.
    pub fn remaining_budget(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    /// Compute the delay to wait before the next attempt.
    ///
    /// Returns `None` when waiting the candidate delay would overrun the
    /// budget; in that case internal state is left untouched, so every
    /// later call returns `None` as well. Returns `Some(delay)` otherwise
    /// and grows the nominal delay by the growth factor, capped so growth
    /// alone can never exceed what is left of the budget.
    pub fn next_delay(&mut self) -> Option<Duration> {
        let remaining = self.remaining_budget();
        let candidate = self.jittered(self.next_delay);
        if candidate >= remaining {
            return None;
        }
        let after_wait = remaining - candidate;
        self.next_delay = self.next_delay.mul_f64(self.growth_factor).min(after_wait);
        Some(candidate)
    }

    fn jittered(&self, nominal: Duration) -> Duration {
        if self.jitter_ratio <= 0.0 {
            return nominal;
        }
        let factor = rand::thread_rng()
            .gen_range(1.0 - self.jitter_ratio..1.0 + self.jitter_ratio);
        nominal.mul_f64(factor)
    }
}

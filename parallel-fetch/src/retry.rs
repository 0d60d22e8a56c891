//! Retry schedule for transient failures.
//!
//! [`RetryPolicy::decide`] is a pure function of the attempt history, so the
//! schedule can be tested without timers or a transport. The loop that
//! sleeps and re-executes lives in [`crate::client::ApiClient`].

use std::time::Duration;

/// Bounded exponential backoff.
///
/// Retrying stops at whichever bound is hit first: `max_retries`, or the
/// cumulative `max_elapsed` budget (including the upcoming delay). The
/// budget covers retry time only; the first attempt is not charged to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Ceiling for a single delay.
    pub max_delay: Duration,
    /// Ceiling for time spent retrying, counted from the first retryable
    /// failure.
    pub max_elapsed: Duration,
}

/// Attempt history for one logical request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryState {
    /// Attempts made so far, including the one that just failed.
    pub attempts: u32,
    /// Time since the first retryable failure.
    pub elapsed: Duration,
}

/// What to do after a retryable failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Sleep for the delay, then attempt again.
    RetryAfter(Duration),
    /// Surface the last failure.
    Stop,
}

impl RetryPolicy {
    /// Creates a policy with the given retry count and default timings.
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    /// Disables retries.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            max_elapsed: Duration::ZERO,
        }
    }

    /// Sets the base delay.
    #[must_use]
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Sets the per-delay ceiling.
    #[must_use]
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Sets the total elapsed budget.
    #[must_use]
    pub fn with_max_elapsed(mut self, budget: Duration) -> Self {
        self.max_elapsed = budget;
        self
    }

    /// Calculates the delay after the given attempt (1-based).
    pub fn delay_after_attempt(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }

    /// Decides whether to retry after a retryable failure.
    pub fn decide(&self, state: &RetryState) -> RetryDecision {
        if state.attempts > self.max_retries {
            return RetryDecision::Stop;
        }

        let delay = self.delay_after_attempt(state.attempts);
        if state.elapsed.saturating_add(delay) > self.max_elapsed {
            return RetryDecision::Stop;
        }

        RetryDecision::RetryAfter(delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
            max_elapsed: Duration::from_secs(10),
        }
    }
}

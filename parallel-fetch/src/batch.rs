//! Concurrent batch dispatch.
//!
//! Requests run with bounded parallelism and each completes independently;
//! one failure never cancels its siblings. Outcomes come back in input order
//! regardless of completion order.

use futures::stream::{self, StreamExt};
use parallel_core::ApiCall;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::client::{ApiClient, Attempted};
use crate::error::FetchError;

/// Default number of requests in flight.
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Upper bound on requests in flight.
pub const MAX_CONCURRENCY: usize = 50;

/// Clamps a requested concurrency into `1..=MAX_CONCURRENCY`.
pub fn clamp_concurrency(requested: usize) -> usize {
    requested.clamp(1, MAX_CONCURRENCY)
}

/// Result of one request in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome<T> {
    /// Position of the request in the input.
    pub index: usize,
    /// Response or final failure after retries.
    pub result: Result<T, FetchError>,
    /// Attempts made.
    pub attempts: u32,
    /// Time spent on this request.
    pub duration: Duration,
}

impl<T> Outcome<T> {
    fn from_attempted(index: usize, attempted: Attempted<T>) -> Self {
        Self {
            index,
            result: attempted.result,
            attempts: attempted.attempts,
            duration: attempted.duration,
        }
    }

    /// Returns true if the request succeeded.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Counts over a finished batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    /// Requests dispatched.
    pub total: usize,
    /// Requests that succeeded.
    pub succeeded: usize,
    /// Requests that failed.
    pub failed: usize,
}

impl BatchSummary {
    /// Tallies `outcomes`.
    pub fn of<T>(outcomes: &[Outcome<T>]) -> Self {
        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        Self {
            total: outcomes.len(),
            succeeded,
            failed: outcomes.len() - succeeded,
        }
    }

    /// True when every request failed.
    pub fn all_failed(&self) -> bool {
        self.total > 0 && self.succeeded == 0
    }

    /// True when some but not all requests failed.
    pub fn partially_failed(&self) -> bool {
        self.failed > 0 && self.succeeded > 0
    }
}

impl ApiClient {
    /// Runs every request through the retry scheduler with at most
    /// `concurrency` in flight.
    ///
    /// Returns one outcome per request, at the request's index. An empty
    /// batch fails with [`FetchError::EmptyBatch`] before anything is sent.
    #[instrument(skip_all, fields(endpoint = %R::ENDPOINT, count = requests.len()))]
    pub async fn dispatch_all<R: ApiCall>(
        &self,
        requests: &[R],
        concurrency: usize,
    ) -> Result<Vec<Outcome<R::Response>>, FetchError> {
        if requests.is_empty() {
            return Err(FetchError::EmptyBatch);
        }

        let limit = clamp_concurrency(concurrency);
        debug!(limit, "Dispatching batch");

        let mut outcomes: Vec<Outcome<R::Response>> = stream::iter(requests.iter().enumerate())
            .map(|(index, request)| async move {
                let attempted = self.run_with_retry(request).await;
                debug!(
                    index,
                    label = %request.label(),
                    attempts = attempted.attempts,
                    ok = attempted.result.is_ok(),
                    "Request finished"
                );
                Outcome::from_attempted(index, attempted)
            })
            .buffer_unordered(limit)
            .collect()
            .await;

        outcomes.sort_by_key(|o| o.index);

        let summary = BatchSummary::of(&outcomes);
        info!(
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Batch complete"
        );

        Ok(outcomes)
    }
}

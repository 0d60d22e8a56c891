//! In-memory transports for unit tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::error::HttpError;
use crate::host::http::{HttpRequest, HttpResponse, Transport};

/// A well-formed API key.
pub const KEY: &str = "test-key-abcdefghijklmnop";

/// A 200 search response with the given id and one result.
pub fn ok_search(id: &str) -> HttpResponse {
    HttpResponse::new(
        200,
        serde_json::json!({
            "search_id": id,
            "results": [{ "url": "https://example.com", "title": "Example", "excerpts": ["text"] }]
        })
        .to_string(),
    )
}

/// Replies from a fixed script, in order, and records what was sent.
///
/// A call takes its scripted reply as soon as it starts, so a call that is
/// cancelled mid-flight still consumes one entry.
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    sent: Mutex<Vec<HttpRequest>>,
    latency: Duration,
    latencies: Mutex<VecDeque<Duration>>,
}

impl ScriptedTransport {
    pub fn new(script: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            sent: Mutex::new(Vec::new()),
            latency: Duration::ZERO,
            latencies: Mutex::new(VecDeque::new()),
        }
    }

    /// Same latency for every call.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Per-call latencies, in order; later calls fall back to `with_latency`.
    pub fn with_latencies(self, latencies: Vec<Duration>) -> Self {
        *self.latencies.lock().unwrap() = latencies.into();
        self
    }

    pub fn calls(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.sent.lock().unwrap().push(request);
        let reply = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(HttpError::Connection("script exhausted".into())));
        let latency = self
            .latencies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(self.latency);
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        reply
    }
}

type Responder = Box<dyn Fn(&HttpRequest) -> Result<HttpResponse, HttpError> + Send + Sync>;
type LatencyFn = Box<dyn Fn(&HttpRequest) -> Duration + Send + Sync>;

/// Replies by calling a closure and tracks peak concurrency.
pub struct FnTransport {
    respond: Responder,
    latency: Option<LatencyFn>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FnTransport {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&HttpRequest) -> Result<HttpResponse, HttpError> + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
            latency: None,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    pub fn with_latency_fn<F>(mut self, latency: F) -> Self
    where
        F: Fn(&HttpRequest) -> Duration + Send + Sync + 'static,
    {
        self.latency = Some(Box::new(latency));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for FnTransport {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = self
            .latency
            .as_ref()
            .map_or(Duration::ZERO, |latency| latency(&request));
        // Always yield so sibling requests get a chance to start.
        tokio::time::sleep(delay).await;
        tokio::task::yield_now().await;

        let response = (self.respond)(&request);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        response
    }
}

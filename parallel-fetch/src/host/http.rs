//! HTTP transport with tracing.
//!
//! The [`Transport`] trait is the only place network I/O happens. The
//! request executor builds an [`HttpRequest`], hands it to a transport and
//! classifies the [`HttpResponse`]; tests substitute in-memory transports.

use async_trait::async_trait;
use reqwest::{header, Client};
use tracing::{debug, instrument};
use url::Url;

use crate::error::HttpError;

/// User agent string for the Parallel CLI.
const USER_AGENT: &str = concat!("parallel-cli/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Request / Response
// ============================================================================

/// A fully built outbound POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Absolute target URL.
    pub url: String,
    /// Header name/value pairs, sent in order.
    pub headers: Vec<(String, String)>,
    /// Serialized JSON body.
    pub body: Vec<u8>,
}

impl HttpRequest {
    /// Returns the first header value with the given (case-insensitive) name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and body of a received response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body text.
    pub body: String,
}

impl HttpResponse {
    /// Creates a response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

// ============================================================================
// Transport
// ============================================================================

/// Sends one HTTP POST and returns the status and body.
///
/// Implementations must not retry; retries are layered above.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` and reads the full response body.
    ///
    /// The caller's per-attempt timeout wraps this whole call, so a slow
    /// body counts against it as well as a slow send.
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}

// ============================================================================
// Reqwest Transport
// ============================================================================

/// [`Transport`] backed by a shared `reqwest` client.
///
/// The client itself has no timeout; the executor bounds each attempt.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    inner: Client,
}

impl ReqwestTransport {
    /// Creates a transport with default settings.
    pub fn new() -> Result<Self, HttpError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(client))
    }

    /// Wraps an existing client.
    pub fn with_client(client: Client) -> Self {
        Self { inner: client }
    }
}

fn classify(err: reqwest::Error) -> HttpError {
    if err.is_connect() {
        HttpError::Connection(err.to_string())
    } else {
        HttpError::Request(err)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[instrument(skip(self, request), fields(url = %request.url))]
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let url = Url::parse(&request.url).map_err(|e| HttpError::InvalidUrl(e.to_string()))?;
        debug!("POST request with JSON");

        let mut builder = self.inner.post(url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if request.header(header::CONTENT_TYPE.as_str()).is_none() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }

        let response = builder.body(request.body).send().await.map_err(classify)?;
        let status = response.status().as_u16();
        debug!(status, "Response received");

        let body = response.text().await.map_err(classify)?;
        Ok(HttpResponse { status, body })
    }
}

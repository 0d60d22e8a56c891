//! Request execution and retries.

use parallel_core::ApiCall;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, instrument, warn};

use crate::auth::{CredentialResolver, CredentialSource, SystemCredentialSource};
use crate::error::FetchError;
use crate::host::http::{HttpRequest, ReqwestTransport, Transport};
use crate::retry::{RetryDecision, RetryState};
use crate::settings::{ClientSettings, API_KEY_HEADER, BETA_CHANNEL, BETA_HEADER};

/// Result of a logical request together with how it was reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempted<T> {
    /// Final result.
    pub result: Result<T, FetchError>,
    /// Attempts made, including the final one.
    pub attempts: u32,
    /// Time from the first attempt to the final result.
    pub duration: Duration,
}

/// Client for the search and extract API.
///
/// Cheap to share by reference across concurrent requests: the transport and
/// the credential source are read-only.
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    credentials: CredentialResolver,
    settings: ClientSettings,
}

impl ApiClient {
    /// Creates a client from its collaborators.
    pub fn new(
        transport: Arc<dyn Transport>,
        credentials: Arc<dyn CredentialSource>,
        settings: ClientSettings,
    ) -> Self {
        Self {
            transport,
            credentials: CredentialResolver::new(credentials),
            settings,
        }
    }

    /// Creates a client using reqwest, the process environment and the
    /// default config location.
    pub fn from_env() -> Result<Self, FetchError> {
        let transport = ReqwestTransport::new()?;
        Ok(Self::new(
            Arc::new(transport),
            Arc::new(SystemCredentialSource::new()),
            ClientSettings::from_env(),
        ))
    }

    /// Fails when no usable API key is available right now.
    pub async fn check_credentials(&self) -> Result<(), FetchError> {
        self.credentials.require().await.map(|_| ())
    }

    /// Sends one request. No retries.
    ///
    /// The credential is resolved fresh for every call. The timeout bounds
    /// the whole transport call, reading the response body included.
    #[instrument(skip_all, fields(endpoint = %R::ENDPOINT))]
    pub async fn execute<R: ApiCall>(&self, request: &R) -> Result<R::Response, FetchError> {
        let credential = self.credentials.require().await?;

        let body = serde_json::to_vec(request)
            .map_err(|e| FetchError::Validation(format!("could not encode request: {e}")))?;

        let http_request = HttpRequest {
            url: self.settings.url_for(R::ENDPOINT.path()),
            headers: vec![
                ("content-type".to_string(), "application/json".to_string()),
                (API_KEY_HEADER.to_string(), credential.expose().to_string()),
                (BETA_HEADER.to_string(), BETA_CHANNEL.to_string()),
            ],
            body,
        };

        let timeout = self.settings.timeout;
        let response = tokio::time::timeout(timeout, self.transport.post(http_request))
            .await
            .map_err(|_| {
                FetchError::Network(format!(
                    "Request timed out after {} seconds",
                    timeout.as_secs()
                ))
            })??;

        if !response.is_success() {
            debug!(status = response.status, "API returned error status");
            return Err(FetchError::api(response.status, response.body));
        }

        serde_json::from_str(&response.body).map_err(|e| FetchError::Decode(e.to_string()))
    }

    /// Sends one request, retrying transient failures per the retry policy.
    ///
    /// Only the last attempt's failure is returned.
    pub async fn execute_with_retry<R: ApiCall>(
        &self,
        request: &R,
    ) -> Result<R::Response, FetchError> {
        self.run_with_retry(request).await.result
    }

    /// Retry loop that also reports the attempt count.
    #[instrument(skip_all, fields(endpoint = %R::ENDPOINT))]
    pub async fn run_with_retry<R: ApiCall>(&self, request: &R) -> Attempted<R::Response> {
        let start = Instant::now();
        let mut retry_start: Option<Instant> = None;
        let mut attempts = 0;

        loop {
            attempts += 1;
            let result = self.execute(request).await;

            let err = match result {
                Err(e) if e.is_retryable() => e,
                result => {
                    return Attempted {
                        result,
                        attempts,
                        duration: start.elapsed(),
                    };
                }
            };

            // The retry budget starts at the first failure, not the first send.
            let state = RetryState {
                attempts,
                elapsed: retry_start.get_or_insert_with(Instant::now).elapsed(),
            };
            match self.settings.retry.decide(&state) {
                RetryDecision::RetryAfter(delay) => {
                    warn!(
                        error = %err,
                        attempt = attempts,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        "Request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                RetryDecision::Stop => {
                    debug!(attempt = attempts, "Retries exhausted");
                    return Attempted {
                        result: Err(err),
                        attempts,
                        duration: start.elapsed(),
                    };
                }
            }
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

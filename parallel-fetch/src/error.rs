//! Fetch error types.

use parallel_core::{CoreError, INVALID_KEY_FORMAT_MESSAGE};
use thiserror::Error;

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for API requests.
///
/// Every variant carries plain data so outcomes can be cloned and compared.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The API key failed format validation.
    #[error("{}", INVALID_KEY_FORMAT_MESSAGE)]
    InvalidCredentialFormat,

    /// No API key in the environment or the config file.
    #[error("No API key set. Use PARALLEL_API_KEY or parallel config set-key <key>")]
    NoCredential,

    /// Transport failure or timeout.
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message derived from the status.
        message: String,
        /// Raw response body.
        body: String,
    },

    /// Response body did not decode into the expected type.
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// A batch with no requests.
    #[error("No requests to dispatch")]
    EmptyBatch,

    /// Malformed input.
    #[error("Validation error: {0}")]
    Validation(String),
}

impl FetchError {
    /// Builds an API error with the user-facing message for `status`.
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let message = match status {
            401 => "Invalid API key. Check your key with 'parallel config get-key'".to_string(),
            402 => "Insufficient credits. Add credits at https://platform.parallel.ai".to_string(),
            422 => format!("Validation error: {body}"),
            429 => "Rate limit exceeded. Try again later.".to_string(),
            _ => format!("API error ({status})"),
        };
        FetchError::Api {
            status,
            message,
            body,
        }
    }

    /// Returns true for transient failures: rate limiting, server errors
    /// and transport errors.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Network(_) => true,
            FetchError::Api { status, .. } => *status == 429 || (500..600).contains(status),
            _ => false,
        }
    }

    /// Returns the HTTP status for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns a stable machine-readable name for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::InvalidCredentialFormat => "invalid_credential_format",
            FetchError::NoCredential => "no_credential",
            FetchError::Network(_) => "network_error",
            FetchError::Api { .. } => "api_error",
            FetchError::Decode(_) => "decode_error",
            FetchError::EmptyBatch => "empty_batch",
            FetchError::Validation(_) => "validation_error",
        }
    }
}

impl From<CoreError> for FetchError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidCredentialFormat => FetchError::InvalidCredentialFormat,
            CoreError::Validation(msg) => FetchError::Validation(msg),
        }
    }
}

impl From<HttpError> for FetchError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::InvalidUrl(msg) => FetchError::Validation(format!("invalid URL: {msg}")),
            other => FetchError::Network(other.to_string()),
        }
    }
}

// ============================================================================
// HTTP Error
// ============================================================================

/// Transport-level error.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Request error.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Connection could not be established.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Timeout.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_messages() {
        assert!(FetchError::api(401, "").to_string().contains("Invalid API key"));
        assert!(FetchError::api(402, "").to_string().contains("Insufficient credits"));
        assert_eq!(
            FetchError::api(422, "objective is required").to_string(),
            "Validation error: objective is required"
        );
        assert!(FetchError::api(429, "").to_string().contains("Rate limit"));
        assert_eq!(FetchError::api(418, "teapot").to_string(), "API error (418)");
    }

    #[test]
    fn test_api_error_keeps_body() {
        let err = FetchError::api(500, "boom");
        assert_eq!(err.status(), Some(500));
        assert!(matches!(err, FetchError::Api { ref body, .. } if body == "boom"));
    }

    #[test]
    fn test_retryable_classification() {
        assert!(FetchError::Network("refused".into()).is_retryable());
        assert!(FetchError::api(429, "").is_retryable());
        assert!(FetchError::api(500, "").is_retryable());
        assert!(FetchError::api(503, "").is_retryable());
        assert!(FetchError::api(599, "").is_retryable());

        assert!(!FetchError::api(400, "").is_retryable());
        assert!(!FetchError::api(401, "").is_retryable());
        assert!(!FetchError::api(402, "").is_retryable());
        assert!(!FetchError::api(422, "").is_retryable());
        assert!(!FetchError::api(600, "").is_retryable());
        assert!(!FetchError::NoCredential.is_retryable());
        assert!(!FetchError::InvalidCredentialFormat.is_retryable());
        assert!(!FetchError::Decode("x".into()).is_retryable());
        assert!(!FetchError::Validation("x".into()).is_retryable());
    }

    #[test]
    fn test_http_errors_map_to_network_except_bad_url() {
        assert!(matches!(
            FetchError::from(HttpError::Timeout(30)),
            FetchError::Network(_)
        ));
        assert!(matches!(
            FetchError::from(HttpError::Connection("refused".into())),
            FetchError::Network(_)
        ));
        assert!(matches!(
            FetchError::from(HttpError::InvalidUrl("nope".into())),
            FetchError::Validation(_)
        ));
    }

    #[test]
    fn test_core_errors_convert() {
        assert_eq!(
            FetchError::from(CoreError::InvalidCredentialFormat),
            FetchError::InvalidCredentialFormat
        );
    }
}

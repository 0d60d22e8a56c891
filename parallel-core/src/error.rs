//! Core error types.

use thiserror::Error;

/// Core error type for validation of user input and credentials.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The API key does not match the accepted format.
    #[error("{}", crate::credential::INVALID_KEY_FORMAT_MESSAGE)]
    InvalidCredentialFormat,

    /// Malformed user input (e.g. a URL that is not http or https).
    #[error("Validation error: {0}")]
    Validation(String),
}

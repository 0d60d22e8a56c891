//! Store error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing the config file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The file was written but its permissions could not be restricted.
    #[error("Failed to secure config file permissions on {}", path.display())]
    InsecurePermissions {
        /// File whose mode did not match.
        path: PathBuf,
    },

    /// Value rejected before it was written.
    #[error("{0}")]
    Invalid(#[from] parallel_core::CoreError),
}

impl StoreError {
    /// Returns true if the underlying cause is a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

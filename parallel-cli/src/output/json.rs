//! JSON output formatting.

use anyhow::Result;
use parallel_fetch::FetchError;
use serde::Serialize;

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for a request that failed.
#[derive(Debug, Serialize)]
pub struct FailureOutput<'a> {
    pub error: ErrorOutput,
    pub input: &'a str,
}

/// Error details.
#[derive(Debug, Serialize)]
pub struct ErrorOutput {
    pub kind: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl From<&FetchError> for ErrorOutput {
    fn from(err: &FetchError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
            status: err.status(),
        }
    }
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats a failed request.
    pub fn format_failure(&self, input: &str, err: &FetchError) -> Result<String> {
        self.format(&FailureOutput {
            error: err.into(),
            input,
        })
    }
}

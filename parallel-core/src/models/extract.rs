//! Extract request and response.

use serde::{Deserialize, Serialize};
use url::Url;

use super::{ApiCall, Endpoint, UsageItem, Warning};
use crate::error::CoreError;

/// Checks that `raw` parses as an absolute `http` or `https` URL.
pub fn validate_http_url(raw: &str) -> Result<Url, CoreError> {
    let url = Url::parse(raw)
        .map_err(|e| CoreError::Validation(format!("invalid URL '{raw}': {e}")))?;

    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        "http" | "https" => Err(CoreError::Validation(format!("URL has no host: '{raw}'"))),
        scheme => Err(CoreError::Validation(format!(
            "unsupported URL scheme '{scheme}' in '{raw}' (expected http or https)"
        ))),
    }
}

/// Body of `POST /v1beta/extract`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractRequest {
    /// Pages to extract.
    pub urls: Vec<String>,
    /// Focus excerpts on this objective.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objective: Option<String>,
    /// Return objective-focused excerpts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpts: Option<bool>,
    /// Return the full page content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_content: Option<bool>,
}

impl ExtractRequest {
    /// Creates a request for a single URL after validating its scheme.
    pub fn for_url(url: &str) -> Result<Self, CoreError> {
        validate_http_url(url)?;
        Ok(Self {
            urls: vec![url.to_string()],
            ..Default::default()
        })
    }

    /// Sets the objective.
    #[must_use]
    pub fn with_objective(mut self, objective: Option<String>) -> Self {
        self.objective = objective;
        self
    }

    /// Sets the content selection.
    ///
    /// Excerpts are forced on when neither excerpts nor full content is
    /// requested, so the response is never empty.
    #[must_use]
    pub fn with_content(mut self, excerpts: bool, full_content: bool) -> Self {
        self.excerpts = Some(excerpts || !full_content);
        self.full_content = Some(full_content);
        self
    }
}

impl ApiCall for ExtractRequest {
    type Response = ExtractResponse;
    const ENDPOINT: Endpoint = Endpoint::Extract;

    fn label(&self) -> String {
        self.urls.join(", ")
    }
}

/// A single extracted page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractResult {
    /// Page URL.
    pub url: String,
    /// Page title.
    #[serde(default)]
    pub title: Option<String>,
    /// Publication date as reported by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_date: Option<String>,
    /// Objective-focused excerpts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpts: Option<Vec<String>>,
    /// Full page content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_content: Option<String>,
}

/// A URL the API could not extract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractError {
    /// URL that failed.
    pub url: String,
    /// Reason reported by the API.
    pub message: String,
}

/// Body returned by `POST /v1beta/extract`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractResponse {
    /// Server-side identifier of this extraction.
    pub extract_id: String,
    /// Extracted pages.
    #[serde(default)]
    pub results: Vec<ExtractResult>,
    /// Per-URL failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ExtractError>>,
    /// Non-fatal warnings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<Warning>>,
    /// Billing counters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Vec<UsageItem>>,
}

//! Search request and response.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ApiCall, Endpoint, UsageItem, Warning};

/// Search processing mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchMode {
    /// Single pass, lowest latency.
    #[default]
    OneShot,
    /// Multi-step search for harder objectives.
    Agentic,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OneShot => f.write_str("one-shot"),
            Self::Agentic => f.write_str("agentic"),
        }
    }
}

/// Excerpt size settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcerptSettings {
    /// Upper bound on excerpt characters per result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_chars_per_result: Option<u32>,
}

/// Body of `POST /v1beta/search`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Processing mode; the API defaults to one-shot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<SearchMode>,
    /// Natural-language description of what to find.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub objective: Option<String>,
    /// Explicit keyword queries to run alongside the objective.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_queries: Option<Vec<String>>,
    /// Maximum number of results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u32>,
    /// Excerpt size settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpts: Option<ExcerptSettings>,
}

impl SearchRequest {
    /// Creates a request for a single objective.
    pub fn for_objective(objective: impl Into<String>) -> Self {
        Self {
            objective: Some(objective.into()),
            ..Default::default()
        }
    }

    /// Sets the search mode.
    #[must_use]
    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Sets explicit search queries. An empty list leaves the field unset.
    #[must_use]
    pub fn with_queries(mut self, queries: Vec<String>) -> Self {
        self.search_queries = if queries.is_empty() { None } else { Some(queries) };
        self
    }

    /// Sets the maximum number of results.
    #[must_use]
    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = Some(max_results);
        self
    }

    /// Sets the per-result excerpt budget.
    #[must_use]
    pub fn with_excerpt_chars(mut self, chars: u32) -> Self {
        self.excerpts = Some(ExcerptSettings {
            max_chars_per_result: Some(chars),
        });
        self
    }
}

impl ApiCall for SearchRequest {
    type Response = SearchResponse;
    const ENDPOINT: Endpoint = Endpoint::Search;

    fn label(&self) -> String {
        self.objective.clone().unwrap_or_default()
    }
}

/// A single search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Page URL.
    pub url: String,
    /// Page title.
    #[serde(default)]
    pub title: Option<String>,
    /// Relevant excerpts from the page.
    #[serde(default)]
    pub excerpts: Vec<String>,
}

/// Body returned by `POST /v1beta/search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Server-side identifier of this search.
    pub search_id: String,
    /// Ranked results.
    #[serde(default)]
    pub results: Vec<SearchResult>,
    /// Non-fatal warnings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<Warning>>,
    /// Billing counters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Vec<UsageItem>>,
}

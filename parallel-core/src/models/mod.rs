//! Wire models for the search and extract endpoints.

mod extract;
mod search;


use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use extract::{validate_http_url, ExtractError, ExtractRequest, ExtractResponse, ExtractResult};
pub use search::{ExcerptSettings, SearchMode, SearchRequest, SearchResponse, SearchResult};

// ============================================================================
// Endpoint
// ============================================================================

/// An API endpoint this client can call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `POST /v1beta/search`
    Search,
    /// `POST /v1beta/extract`
    Extract,
}

impl Endpoint {
    /// Returns the URL path for this endpoint.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Search => "/v1beta/search",
            Self::Extract => "/v1beta/extract",
        }
    }

    /// Returns a short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Extract => "extract",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// ApiCall
// ============================================================================

/// A request payload bound to the endpoint that accepts it.
///
/// Implementors are immutable request values; the associated `Response`
/// is the type the endpoint's JSON body decodes into.
pub trait ApiCall: Serialize + Send + Sync {
    /// Decoded response body type.
    type Response: DeserializeOwned + Send;

    /// Endpoint this payload is posted to.
    const ENDPOINT: Endpoint;

    /// Short description of the input, used to label per-item output.
    fn label(&self) -> String;
}

// ============================================================================
// Shared response parts
// ============================================================================

/// A warning attached to a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    /// Warning category.
    #[serde(rename = "type")]
    pub kind: String,
    /// Human-readable message.
    pub message: String,
}

/// A usage counter attached to a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageItem {
    /// SKU or counter name.
    pub name: String,
    /// Units consumed.
    pub count: u64,
}

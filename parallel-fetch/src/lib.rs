// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Parallel Fetch
//!
//! Talks to the Parallel search and extract API.
//!
//! ## Layers
//!
//! - [`auth::CredentialResolver`] - Picks the API key from the environment or config
//! - [`client::ApiClient::execute`] - One authenticated POST, classified
//! - [`client::ApiClient::execute_with_retry`] - Bounded exponential backoff
//! - [`client::ApiClient::dispatch_all`] - Many requests, bounded parallelism
//! - [`host::http::Transport`] - The network seam
//!
//! ## Example
//!
//! ```ignore
//! use parallel_core::SearchRequest;
//! use parallel_fetch::ApiClient;
//!
//! let client = ApiClient::from_env()?;
//! let requests = vec![
//!     SearchRequest::for_objective("rust async runtimes"),
//!     SearchRequest::for_objective("tokio vs async-std"),
//! ];
//! for outcome in client.dispatch_all(&requests, 5).await? {
//!     println!("{}: {:?}", outcome.index, outcome.result.map(|r| r.search_id));
//! }
//! ```

pub mod auth;
pub mod batch;
pub mod client;
pub mod error;
pub mod host;
pub mod retry;
pub mod settings;

#[cfg(test)]
mod test_support;

pub use auth::{
    CredentialResolver, CredentialSource, StaticCredentialSource, SystemCredentialSource,
    API_KEY_ENV,
};
pub use batch::{clamp_concurrency, BatchSummary, Outcome, DEFAULT_CONCURRENCY, MAX_CONCURRENCY};
pub use client::{ApiClient, Attempted};
pub use error::{FetchError, HttpError};
pub use host::http::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
pub use retry::{RetryDecision, RetryPolicy, RetryState};
pub use settings::{ClientSettings, API_BASE_ENV, DEFAULT_API_BASE, DEFAULT_TIMEOUT};

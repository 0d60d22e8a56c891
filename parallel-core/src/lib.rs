// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Parallel Core
//!
//! Core types and wire models shared by the Parallel CLI crates.
//!
//! This crate provides:
//!
//! - Request and response models for the search and extract endpoints
//! - The [`Credential`] type and its format validation
//! - Input validation helpers (URL scheme checks)
//! - Error types
//!
//! ## Key Types
//!
//! ### Endpoints
//! - [`Endpoint`] - The API endpoints this client talks to
//! - [`ApiCall`] - Binds a request payload to its endpoint and response type
//!
//! ### Search
//! - [`SearchRequest`] / [`SearchResponse`]
//!
//! ### Extract
//! - [`ExtractRequest`] / [`ExtractResponse`]

pub mod credential;
pub mod error;
pub mod models;

pub use credential::{is_valid_api_key, Credential, INVALID_KEY_FORMAT_MESSAGE};
pub use error::CoreError;
pub use models::{
    validate_http_url, ApiCall, Endpoint, ExcerptSettings, ExtractError, ExtractRequest,
    ExtractResponse, ExtractResult, SearchMode, SearchRequest, SearchResponse, SearchResult,
    UsageItem, Warning,
};

//! Client settings.

use std::time::Duration;

use crate::retry::RetryPolicy;

/// Default API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.parallel.ai";

/// Environment variable that overrides the API base URL.
pub const API_BASE_ENV: &str = "PARALLEL_API_BASE";

/// Header naming the beta channel.
pub const BETA_HEADER: &str = "parallel-beta";

/// Beta channel this client speaks.
pub const BETA_CHANNEL: &str = "search-extract-2025-10-10";

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Per-attempt timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for the API client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// Scheme and host the endpoint paths are appended to.
    pub base_url: String,
    /// Bound on a single attempt.
    pub timeout: Duration,
    /// Backoff for transient failures.
    pub retry: RetryPolicy,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }
}

impl ClientSettings {
    /// Default settings with the base URL taken from [`API_BASE_ENV`] when set.
    pub fn from_env() -> Self {
        let base = std::env::var(API_BASE_ENV).ok();
        Self::default().with_base_url_override(base.as_deref())
    }

    /// Replaces the base URL when `base` is non-blank.
    #[must_use]
    pub fn with_base_url_override(mut self, base: Option<&str>) -> Self {
        if let Some(base) = base.map(str::trim).filter(|b| !b.is_empty()) {
            self.base_url = base.to_string();
        }
        self
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the per-attempt timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the retry policy.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Joins the base URL and an endpoint path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

//! API key resolution.
//!
//! The resolver reads its inputs through [`CredentialSource`] on every call
//! instead of caching: the config file may change between attempts.

use async_trait::async_trait;
use parallel_core::Credential;
use parallel_store::{ConfigStore, StoreError};
use std::sync::Arc;
use tracing::debug;

use crate::error::FetchError;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "PARALLEL_API_KEY";

// ============================================================================
// Credential Source
// ============================================================================

/// Where candidate API keys come from.
#[async_trait]
pub trait CredentialSource: Send + Sync {
    /// Raw value from the environment, if set.
    fn env_credential(&self) -> Option<String>;

    /// Raw value from the stored config.
    async fn load_stored_credential(&self) -> Result<Option<String>, StoreError>;
}

/// Reads the process environment and the config file.
#[derive(Debug, Clone)]
pub struct SystemCredentialSource {
    env_var: String,
    store: ConfigStore,
}

impl SystemCredentialSource {
    /// Uses [`API_KEY_ENV`] and the default config location.
    pub fn new() -> Self {
        Self::with_store(ConfigStore::at_default_location())
    }

    /// Uses [`API_KEY_ENV`] and the given store.
    pub fn with_store(store: ConfigStore) -> Self {
        Self {
            env_var: API_KEY_ENV.to_string(),
            store,
        }
    }
}

impl Default for SystemCredentialSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialSource for SystemCredentialSource {
    fn env_credential(&self) -> Option<String> {
        std::env::var(&self.env_var).ok()
    }

    async fn load_stored_credential(&self) -> Result<Option<String>, StoreError> {
        self.store.load_api_key().await
    }
}

/// Fixed values, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentialSource {
    env: Option<String>,
    stored: Option<String>,
    config_unavailable: bool,
}

impl StaticCredentialSource {
    /// Creates a source with the given environment and stored values.
    pub fn new(env: Option<&str>, stored: Option<&str>) -> Self {
        Self {
            env: env.map(str::to_string),
            stored: stored.map(str::to_string),
            config_unavailable: false,
        }
    }

    /// Makes the stored-config load fail.
    #[must_use]
    pub fn with_config_unavailable(mut self) -> Self {
        self.config_unavailable = true;
        self
    }
}

#[async_trait]
impl CredentialSource for StaticCredentialSource {
    fn env_credential(&self) -> Option<String> {
        self.env.clone()
    }

    async fn load_stored_credential(&self) -> Result<Option<String>, StoreError> {
        if self.config_unavailable {
            return Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "config not found",
            )));
        }
        Ok(self.stored.clone())
    }
}

// ============================================================================
// Resolver
// ============================================================================

/// Picks the API key: environment first, then stored config.
///
/// An invalid environment value fails immediately; it never falls back to
/// the stored key.
#[derive(Clone)]
pub struct CredentialResolver {
    source: Arc<dyn CredentialSource>,
}

impl CredentialResolver {
    /// Creates a resolver over `source`.
    pub fn new(source: Arc<dyn CredentialSource>) -> Self {
        Self { source }
    }

    /// Resolves the key, or `None` when neither source has one.
    pub async fn resolve(&self) -> Result<Option<Credential>, FetchError> {
        if let Some(raw) = self.source.env_credential() {
            if let Some(credential) = Credential::parse(&raw)? {
                debug!(source = "env", "Resolved API key");
                return Ok(Some(credential));
            }
        }

        let stored = match self.source.load_stored_credential().await {
            Ok(stored) => stored,
            Err(e) => {
                debug!(error = %e, "Stored config unavailable");
                None
            }
        };

        if let Some(raw) = stored {
            if let Some(credential) = Credential::parse(&raw)? {
                debug!(source = "config", "Resolved API key");
                return Ok(Some(credential));
            }
        }

        Ok(None)
    }

    /// Resolves the key, failing with [`FetchError::NoCredential`] when absent.
    pub async fn require(&self) -> Result<Credential, FetchError> {
        self.resolve().await?.ok_or(FetchError::NoCredential)
    }
}

impl std::fmt::Debug for CredentialResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialResolver").finish_non_exhaustive()
    }
}

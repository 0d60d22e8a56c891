//! Stored configuration (the persisted API key).

use parallel_core::{CoreError, Credential};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::StoreError;
use crate::persistence::{default_config_path, load_json, remove_file, save_json};

/// Contents of `config.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StoredConfig {
    /// Stored API key, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Reads and writes the config file at a fixed path.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Creates a store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the platform default location.
    pub fn at_default_location() -> Self {
        Self::new(default_config_path())
    }

    /// Returns the config file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the config file.
    ///
    /// A missing file is reported as an error; callers that treat it as
    /// empty should check [`StoreError::is_not_found`].
    pub async fn load(&self) -> Result<StoredConfig, StoreError> {
        load_json(&self.path).await
    }

    /// Loads just the stored API key, without validating it.
    pub async fn load_api_key(&self) -> Result<Option<String>, StoreError> {
        Ok(self.load().await?.api_key)
    }

    /// Writes the config file.
    pub async fn save(&self, config: &StoredConfig) -> Result<(), StoreError> {
        save_json(&self.path, config).await
    }

    /// Validates `key` and stores it, replacing any previous key.
    pub async fn set_api_key(&self, key: &str) -> Result<(), StoreError> {
        let credential = Credential::parse(key)?
            .ok_or_else(|| CoreError::Validation("API key must not be empty".to_string()))?;

        self.save(&StoredConfig {
            api_key: Some(credential.expose().to_string()),
        })
        .await?;

        info!(path = %self.path.display(), "API key saved");
        Ok(())
    }

    /// Deletes the config file. Succeeds if it is already gone.
    pub async fn remove(&self) -> Result<(), StoreError> {
        remove_file(&self.path).await?;
        info!(path = %self.path.display(), "Config removed");
        Ok(())
    }
}

//! Config command - manage the stored API key.

use anyhow::Result;
use clap::{Args, Subcommand};
use parallel_fetch::{CredentialResolver, SystemCredentialSource};
use parallel_store::{ConfigStore, StoreError};
use std::sync::Arc;

use super::UsageError;
use crate::ExitCode;

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Store an API key in the config file.
    SetKey {
        /// API key to store.
        key: String,
    },

    /// Print the API key in effect (environment first, then config file).
    GetKey,

    /// Delete the config file.
    UnsetKey,

    /// Print the config file path.
    Path,
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs) -> Result<ExitCode> {
    let store = ConfigStore::at_default_location();
    let line = execute(&args.action, &store).await?;
    println!("{line}");
    Ok(ExitCode::Success)
}

/// Performs `action` against `store` and returns the line to print.
async fn execute(action: &ConfigAction, store: &ConfigStore) -> Result<String> {
    match action {
        ConfigAction::SetKey { key } => set_key(store, key).await,
        ConfigAction::GetKey => get_key(store).await,
        ConfigAction::UnsetKey => unset_key(store).await,
        ConfigAction::Path => Ok(store.path().display().to_string()),
    }
}

async fn set_key(store: &ConfigStore, key: &str) -> Result<String> {
    store.set_api_key(key).await.map_err(|e| match e {
        StoreError::Invalid(invalid) => anyhow::Error::new(UsageError::new(invalid.to_string())),
        other => other.into(),
    })?;
    Ok(store.path().display().to_string())
}

async fn get_key(store: &ConfigStore) -> Result<String> {
    let resolver = CredentialResolver::new(Arc::new(SystemCredentialSource::with_store(
        store.clone(),
    )));
    let credential = resolver.require().await?;
    Ok(credential.expose().to_string())
}

async fn unset_key(store: &ConfigStore) -> Result<String> {
    store.remove().await?;
    Ok(store.path().display().to_string())
}

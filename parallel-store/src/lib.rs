// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Parallel Store
//!
//! On-disk configuration for the Parallel CLI.
//!
//! This crate provides:
//!
//! - **ConfigStore**: load, save and remove the stored API key
//! - **Persistence**: secure JSON file helpers (atomic write, `0600`)
//! - **Paths**: platform config directory resolution
//!
//! ## Usage
//!
//! ```ignore
//! use parallel_store::ConfigStore;
//!
//! let store = ConfigStore::at_default_location();
//! store.set_api_key("my-api-key-0123456789").await?;
//! let config = store.load().await?;
//! ```

pub mod config;
pub mod error;
pub mod persistence;

pub use config::{ConfigStore, StoredConfig};
pub use error::StoreError;
pub use persistence::{
    default_config_dir, default_config_path, load_json, remove_file, resolve_config_dir,
    save_json, APP_NAME, CONFIG_DIR_ENV, CONFIG_FILE_NAME,
};

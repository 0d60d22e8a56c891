//! File persistence helpers.
//!
//! Handles config path resolution and JSON file I/O with owner-only
//! permissions.

use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::StoreError;

/// Directory name used under the platform config directory.
pub const APP_NAME: &str = "parallel";

/// Config file name inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "PARALLEL_CONFIG_DIR";

// ============================================================================
// Default Paths
// ============================================================================

/// Resolves the config directory, preferring a non-blank override.
///
/// - override: used as-is
/// - macOS: `~/Library/Application Support/parallel`
/// - Linux: `$XDG_CONFIG_HOME/parallel` or `~/.config/parallel`
/// - Windows: `%APPDATA%\parallel`
pub fn resolve_config_dir(override_dir: Option<&str>) -> PathBuf {
    if let Some(dir) = override_dir.map(str::trim).filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }

    #[cfg(target_os = "macos")]
    {
        dirs::home_dir()
            .map(|h| h.join("Library").join("Application Support").join(APP_NAME))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    #[cfg(not(target_os = "macos"))]
    {
        dirs::config_dir()
            .map(|c| c.join(APP_NAME))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Returns the config directory for this process, honouring
/// [`CONFIG_DIR_ENV`].
pub fn default_config_dir() -> PathBuf {
    let override_dir = std::env::var(CONFIG_DIR_ENV).ok();
    resolve_config_dir(override_dir.as_deref())
}

/// Returns the default config file path.
pub fn default_config_path() -> PathBuf {
    default_config_dir().join(CONFIG_FILE_NAME)
}

// ============================================================================
// Security: File Permissions
// ============================================================================

#[cfg(unix)]
async fn set_mode(path: &Path, mode: u32) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;

    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).await?;
    debug!(path = %path.display(), mode = %format!("{mode:o}"), "Set permissions");
    Ok(())
}

/// Confirms the file mode is exactly owner read/write.
#[cfg(unix)]
async fn verify_owner_only(path: &Path) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;

    let mode = tokio::fs::metadata(path).await?.permissions().mode();
    if mode & 0o777 != 0o600 {
        return Err(StoreError::InsecurePermissions {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

#[cfg(not(unix))]
async fn set_mode(_path: &Path, _mode: u32) -> Result<(), StoreError> {
    Ok(())
}

#[cfg(not(unix))]
async fn verify_owner_only(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}

// ============================================================================
// File Operations
// ============================================================================

/// Creates the parent directory with owner-only access if it is missing.
async fn create_secure_parent_dir(path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !tokio::fs::try_exists(parent).await? {
            debug!(path = %parent.display(), "Creating config directory");
            tokio::fs::create_dir_all(parent).await?;
            set_mode(parent, 0o700).await?;
        }
    }
    Ok(())
}

/// Saves data to a JSON file with secure permissions.
///
/// Writes atomically (temp file + rename), restricts the temp file to
/// `0600` before the rename and verifies the final mode afterwards.
pub async fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<(), StoreError> {
    debug!(path = %path.display(), "Saving JSON file");

    create_secure_parent_dir(path).await?;

    let mut json = serde_json::to_string(data)?;
    json.push('\n');

    let temp_path = path.with_extension("json.tmp");
    tokio::fs::write(&temp_path, &json).await?;
    set_mode(&temp_path, 0o600).await?;
    tokio::fs::rename(&temp_path, path).await?;

    verify_owner_only(path).await?;

    debug!(path = %path.display(), "JSON file saved");
    Ok(())
}

/// Loads data from a JSON file.
pub async fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    debug!(path = %path.display(), "Loading JSON file");

    let content = tokio::fs::read_to_string(path).await?;
    let data = serde_json::from_str(&content)?;
    Ok(data)
}

/// Removes a file; a file that does not exist is not an error.
pub async fn remove_file(path: &Path) -> Result<(), StoreError> {
    match tokio::fs::remove_file(path).await {
        Ok(()) => {
            debug!(path = %path.display(), "Removed file");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

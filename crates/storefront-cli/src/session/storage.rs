//! Session storage for persisting login state.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use storefront_core::ApiUrl;
use storefront_http::{ClientConfig, SessionStore, StoredCookie, StorefrontClient};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Stored session data.
#[derive(Debug, Serialize, Deserialize)]
pub struct StoredSession {
    pub api: ApiUrl,
    pub cookies: Vec<StoredCookie>,
}

impl StoredSession {
    /// Rebuild a client around the stored cookies.
    pub fn into_client(self) -> Result<StorefrontClient> {
        let store = Arc::new(SessionStore::restore(&self.api, self.cookies));
        StorefrontClient::with_store(ClientConfig::new(self.api), store)
            .context("Failed to create client")
    }
}

/// Get the session file path.
fn session_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "storefront").context("Could not determine data directory")?;

    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    Ok(data_dir.join("session.json"))
}

/// Save the client's session to disk, or remove the file if it holds none.
pub async fn save(client: &StorefrontClient) -> Result<()> {
    if !client.store().has_session() {
        return clear().await;
    }

    let stored = StoredSession {
        api: client.api().clone(),
        cookies: client.store().snapshot(),
    };

    let path = session_path()?;
    let json = serde_json::to_string_pretty(&stored)?;

    fs::write(&path, &json).context("Failed to write session file")?;

    // Set restrictive permissions (Unix only)
    #[cfg(unix)]
    {
        let mut perms = fs::metadata(&path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&path, perms)?;
    }

    Ok(())
}

/// Load the stored session, if any.
pub async fn load() -> Result<Option<StoredSession>> {
    let path = session_path()?;

    if !path.exists() {
        return Ok(None);
    }

    let json = fs::read_to_string(&path).context("Failed to read session file")?;
    let stored: StoredSession = serde_json::from_str(&json).context("Invalid session file")?;

    Ok(Some(stored))
}

/// Clear the stored session.
pub async fn clear() -> Result<()> {
    let path = session_path()?;

    if path.exists() {
        fs::remove_file(&path).context("Failed to remove session file")?;
    }

    Ok(())
}

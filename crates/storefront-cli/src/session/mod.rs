//! Persistent CLI session.

pub mod storage;

use anyhow::{Context, Result};

use storefront_core::ApiUrl;
use storefront_core::error::AuthError;
use storefront_http::{ClientConfig, StorefrontClient};

/// API used when neither `--api` nor a stored session names one.
pub const DEFAULT_API: &str = "http://localhost:5000";

/// Open a client, restoring the stored session when it belongs to the same API.
///
/// An explicit `api` that differs from the stored session's starts a fresh,
/// unauthenticated client; the stored session is left untouched until saved.
pub async fn open(api: Option<&str>) -> Result<StorefrontClient> {
    let requested = api
        .map(|a| ApiUrl::new(a).context("Invalid API URL"))
        .transpose()?;

    if let Some(stored) = storage::load().await.context("Failed to load session")? {
        if requested.as_ref().is_none_or(|r| *r == stored.api) {
            return stored.into_client();
        }
        tracing::debug!(stored = %stored.api, "Ignoring stored session for a different API");
    }

    let api = match requested {
        Some(api) => api,
        None => ApiUrl::new(DEFAULT_API).context("Invalid default API URL")?,
    };
    StorefrontClient::new(ClientConfig::new(api)).context("Failed to create client")
}

/// Open a client that must already hold a session.
pub async fn require(api: Option<&str>) -> Result<StorefrontClient> {
    let client = open(api).await?;
    if !client.store().has_session() {
        return Err(storefront_core::Error::from(AuthError::NoSession))
            .context("No active session. Run 'storefront login' first.");
    }
    Ok(client)
}

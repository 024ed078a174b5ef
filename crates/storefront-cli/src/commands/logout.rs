//! Logout command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::output;
use crate::session::{self, storage};

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs, api: Option<&str>) -> Result<()> {
    let client = session::require(api).await?;

    let result = client.logout().await;

    // The local session is gone either way.
    storage::clear()
        .await
        .context("Failed to remove session file")?;

    match result {
        Ok(()) => output::success("Logged out"),
        Err(e) => output::warning(&format!("Server logout failed ({}); local session removed", e)),
    }

    Ok(())
}

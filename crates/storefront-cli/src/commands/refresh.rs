//! Refresh command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::output;
use crate::session;

use super::persist;

#[derive(Args, Debug)]
pub struct RefreshArgs {}

pub async fn run(_args: RefreshArgs, api: Option<&str>) -> Result<()> {
    let client = session::require(api).await?;

    eprintln!("{}", "Refreshing session...".dimmed());

    persist(&client, client.refresh().await)
        .await
        .context("Failed to refresh session")?;

    output::success("Session refreshed successfully");

    Ok(())
}

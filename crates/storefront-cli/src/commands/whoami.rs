//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::output;
use crate::session;

use super::persist;

#[derive(Args, Debug)]
pub struct WhoamiArgs {}

pub async fn run(_args: WhoamiArgs, api: Option<&str>) -> Result<()> {
    let client = session::require(api).await?;

    let profile = persist(&client, client.profile().await)
        .await
        .context("Failed to fetch profile")?;

    output::profile(&profile, client.api());

    Ok(())
}

//! Register command implementation.

use anyhow::{Context, Result};
use clap::Args;

use storefront_core::{ApiUrl, Registration};
use storefront_http::{ClientConfig, StorefrontClient};

use crate::output;
use crate::session::{DEFAULT_API, storage};

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long, env = "STOREFRONT_PASSWORD")]
    pub password: String,
}

pub async fn run(args: RegisterArgs, api: Option<&str>) -> Result<()> {
    let api = ApiUrl::new(api.unwrap_or(DEFAULT_API)).context("Invalid API URL")?;
    let client = StorefrontClient::new(ClientConfig::new(api)).context("Failed to create client")?;
    let registration = Registration::new(&args.name, &args.email, &args.password);

    let profile = client
        .register(&registration)
        .await
        .context("Failed to register")?;

    storage::save(&client)
        .await
        .context("Failed to save session")?;

    output::success("Account created");
    output::profile(&profile, client.api());

    Ok(())
}

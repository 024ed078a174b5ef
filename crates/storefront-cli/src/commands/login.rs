//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use storefront_core::{ApiUrl, Credentials};
use storefront_http::{ClientConfig, StorefrontClient};

use crate::output;
use crate::session::{DEFAULT_API, storage};

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long, env = "STOREFRONT_PASSWORD")]
    pub password: String,
}

pub async fn run(args: LoginArgs, api: Option<&str>) -> Result<()> {
    let api = ApiUrl::new(api.unwrap_or(DEFAULT_API)).context("Invalid API URL")?;
    let client = StorefrontClient::new(ClientConfig::new(api)).context("Failed to create client")?;
    let credentials = Credentials::new(&args.email, &args.password);

    eprintln!("{}", "Logging in...".dimmed());

    let profile = client
        .login(&credentials)
        .await
        .context("Failed to login")?;

    storage::save(&client)
        .await
        .context("Failed to save session")?;

    output::success("Logged in successfully");
    println!();
    output::profile(&profile, client.api());

    Ok(())
}

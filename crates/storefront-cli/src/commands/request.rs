//! Raw request command implementation.

use anyhow::{Context, Result};
use clap::Args;

use storefront_core::{Area, Method, RequestDescriptor};

use crate::output::{self, JsonStyle};
use crate::session;

use super::persist;

#[derive(Args, Debug)]
pub struct RequestArgs {
    /// Resource area (auth, admin, user, product, public)
    pub area: Area,

    /// HTTP method
    pub method: Method,

    /// Path relative to the area's base path
    pub path: String,

    /// JSON request body
    #[arg(long)]
    pub body: Option<String>,
}

pub async fn run(args: RequestArgs, api: Option<&str>) -> Result<()> {
    let client = session::open(api).await?;

    let mut request = RequestDescriptor::new(args.method, &args.path);
    if let Some(body) = &args.body {
        let body: serde_json::Value = serde_json::from_str(body).context("Invalid JSON body")?;
        request = request.with_body(body);
    }

    let response = persist(&client, client.instance(args.area).send(&request).await)
        .await
        .with_context(|| format!("{} {} failed", args.area, request))?;

    match response.json::<serde_json::Value>() {
        Ok(value) => output::value(&value, JsonStyle::Pretty),
        Err(_) => {
            println!("{}", response.text());
            Ok(())
        }
    }
}

//! Catalog command implementations.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::output;
use crate::session;

use super::persist;

#[derive(Args, Debug)]
pub struct ProductsArgs {
    /// Fetch a single product by ID
    pub id: Option<String>,

    /// Only list products in this category
    #[arg(long)]
    pub category: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Debug)]
pub struct CategoriesArgs {
    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn products(args: ProductsArgs, api: Option<&str>) -> Result<()> {
    let client = session::open(api).await?;

    if let Some(id) = &args.id {
        let product = persist(&client, client.product(id).await)
            .await
            .context("Failed to fetch product")?;
        return output::items(&[product], args.pretty.into());
    }

    let products = persist(&client, client.products(args.category.as_deref()).await)
        .await
        .context("Failed to list products")?;

    if products.is_empty() {
        eprintln!("{}", "No products found.".dimmed());
        return Ok(());
    }

    output::items(&products, args.pretty.into())
}

pub async fn categories(args: CategoriesArgs, api: Option<&str>) -> Result<()> {
    let client = session::open(api).await?;

    let categories = persist(&client, client.categories().await)
        .await
        .context("Failed to list categories")?;

    output::items(&categories, args.pretty.into())
}

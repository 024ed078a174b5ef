//! Cart command implementation.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use storefront_core::models::{CartItem, Customization};

use crate::output;
use crate::session;

use super::persist;

#[derive(Args, Debug)]
pub struct CartArgs {
    #[command(subcommand)]
    pub action: Option<CartAction>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
}

#[derive(Subcommand, Debug)]
pub enum CartAction {
    /// Add a product to the cart
    Add {
        /// Product ID
        product: String,

        /// Quantity to add
        #[arg(long, default_value_t = 1)]
        quantity: u32,

        /// Custom print text
        #[arg(long)]
        text: Option<String>,

        /// Custom colour
        #[arg(long)]
        color: Option<String>,

        /// URL of uploaded artwork
        #[arg(long)]
        image_url: Option<String>,
    },

    /// Remove a product from the cart
    Remove {
        /// Product ID
        product: String,
    },
}

pub async fn run(args: CartArgs, api: Option<&str>) -> Result<()> {
    let client = session::require(api).await?;

    let result = match args.action {
        None => client.cart().await,
        Some(CartAction::Add {
            product,
            quantity,
            text,
            color,
            image_url,
        }) => {
            let customization = (text.is_some() || color.is_some() || image_url.is_some())
                .then_some(Customization {
                    text,
                    color,
                    image_url,
                });
            let line = CartItem {
                product_id: product,
                quantity,
                customization,
            };
            client.add_to_cart(&line).await
        }
        Some(CartAction::Remove { product }) => client.remove_from_cart(&product).await,
    };

    let cart = persist(&client, result)
        .await
        .context("Cart request failed")?;

    if cart.items.is_empty() {
        eprintln!("{}", "Cart is empty.".dimmed());
        return Ok(());
    }

    output::items(&cart.items, args.pretty.into())
}

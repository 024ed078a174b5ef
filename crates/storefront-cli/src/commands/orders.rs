//! Orders command implementation.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use storefront_core::models::NewOrder;

use crate::output;
use crate::session;

use super::persist;

#[derive(Args, Debug)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub action: Option<OrdersAction>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
}

#[derive(Subcommand, Debug)]
pub enum OrdersAction {
    /// Order everything in the cart
    Place {
        /// Shipping address
        #[arg(long)]
        address: String,
    },
}

pub async fn run(args: OrdersArgs, api: Option<&str>) -> Result<()> {
    let client = session::require(api).await?;

    match args.action {
        None => {
            let orders = persist(&client, client.orders().await)
                .await
                .context("Failed to list orders")?;

            if orders.is_empty() {
                eprintln!("{}", "No orders found.".dimmed());
                return Ok(());
            }
            output::items(&orders, args.pretty.into())
        }
        Some(OrdersAction::Place { address }) => {
            let cart = persist(&client, client.cart().await)
                .await
                .context("Failed to fetch cart")?;
            if cart.items.is_empty() {
                anyhow::bail!("Cart is empty; nothing to order");
            }

            let order = NewOrder {
                items: cart.items,
                shipping_address: address,
            };
            let placed = persist(&client, client.place_order(&order).await)
                .await
                .context("Failed to place order")?;

            output::success("Order placed");
            output::field("Order", &placed.id);
            output::field("Total", &format!("{:.2}", placed.total_price));
            Ok(())
        }
    }
}

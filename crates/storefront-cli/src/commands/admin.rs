//! Admin subcommand implementations.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use storefront_core::models::OrderStatus;

use crate::output;
use crate::session;

use super::persist;

#[derive(Args, Debug)]
pub struct AdminCommand {
    #[command(subcommand)]
    pub command: AdminSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AdminSubcommand {
    /// List all users
    Users {
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Delete a user
    DeleteUser {
        /// User ID
        id: String,
    },

    /// List every order
    Orders {
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Change an order's status
    SetStatus {
        /// Order ID
        id: String,

        /// New status (pending, processing, shipped, delivered, cancelled)
        status: OrderStatus,
    },
}

pub async fn handle(cmd: AdminCommand, api: Option<&str>) -> Result<()> {
    let client = session::require(api).await?;

    match cmd.command {
        AdminSubcommand::Users { pretty } => {
            let users = persist(&client, client.users().await)
                .await
                .context("Failed to list users")?;
            output::items(&users, pretty.into())
        }
        AdminSubcommand::DeleteUser { id } => {
            persist(&client, client.delete_user(&id).await)
                .await
                .context("Failed to delete user")?;
            output::success(&format!("Deleted user {}", id));
            Ok(())
        }
        AdminSubcommand::Orders { pretty } => {
            let orders = persist(&client, client.all_orders().await)
                .await
                .context("Failed to list orders")?;
            output::items(&orders, pretty.into())
        }
        AdminSubcommand::SetStatus { id, status } => {
            let order = persist(&client, client.update_order_status(&id, status).await)
                .await
                .context("Failed to update order")?;
            output::success(&format!("Order {} is now {:?}", order.id, order.status));
            Ok(())
        }
    }
}

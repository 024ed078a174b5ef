//! Subcommand implementations.

mod admin;
mod cart;
mod catalog;
mod login;
mod logout;
mod orders;
mod refresh;
mod register;
mod request;
mod whoami;

use anyhow::Result;
use clap::Subcommand;

use storefront_http::StorefrontClient;

use crate::output;
use crate::session::storage;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new session (login)
    Login(login::LoginArgs),

    /// Create an account and log in
    Register(register::RegisterArgs),

    /// End the session
    Logout(logout::LogoutArgs),

    /// Display the logged-in user
    Whoami(whoami::WhoamiArgs),

    /// Renew the session credential
    Refresh(refresh::RefreshArgs),

    /// List catalog products
    Products(catalog::ProductsArgs),

    /// List product categories
    Categories(catalog::CategoriesArgs),

    /// Show or change the cart
    Cart(cart::CartArgs),

    /// List or place orders
    Orders(orders::OrdersArgs),

    /// Administrative operations
    Admin(admin::AdminCommand),

    /// Send a raw request through one of the API instances
    Request(request::RequestArgs),
}

pub async fn handle(cmd: Command, api: Option<&str>) -> Result<()> {
    match cmd {
        Command::Login(args) => login::run(args, api).await,
        Command::Register(args) => register::run(args, api).await,
        Command::Logout(args) => logout::run(args, api).await,
        Command::Whoami(args) => whoami::run(args, api).await,
        Command::Refresh(args) => refresh::run(args, api).await,
        Command::Products(args) => catalog::products(args, api).await,
        Command::Categories(args) => catalog::categories(args, api).await,
        Command::Cart(args) => cart::run(args, api).await,
        Command::Orders(args) => orders::run(args, api).await,
        Command::Admin(cmd) => admin::handle(cmd, api).await,
        Command::Request(args) => request::run(args, api).await,
    }
}

/// Persist the client's session after a command, whatever its outcome.
///
/// A denied renewal means the server no longer honours the stored session,
/// so it is dropped rather than saved.
async fn persist<T>(client: &StorefrontClient, result: storefront_core::Result<T>) -> Result<T> {
    match result {
        Err(err) if err.is_renewal_denied() => {
            client.store().clear();
            storage::clear().await?;
            output::warning("Session expired. Run 'storefront login' again.");
            Err(err.into())
        }
        result => {
            storage::save(client).await?;
            Ok(result?)
        }
    }
}

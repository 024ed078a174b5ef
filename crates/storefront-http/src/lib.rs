//! storefront-http - HTTP session client for the storefront API.
//!
//! Five named instances (auth, admin, user, product, public) share one
//! cookie [`SessionStore`]. The four authenticated instances route failures
//! through a shared [`RecoveryPolicy`] that renews the session once via the
//! public instance and replays the original request.
//!
//! # Example
//!
//! ```no_run
//! use storefront_core::{ApiUrl, Credentials};
//! use storefront_http::{ClientConfig, StorefrontClient};
//!
//! # async fn example() -> storefront_core::Result<()> {
//! let api = ApiUrl::new("https://shop.example.com")?;
//! let client = StorefrontClient::new(ClientConfig::new(api))?;
//! client.login(&Credentials::new("alice@example.com", "secret")).await?;
//!
//! for order in client.orders().await? {
//!     println!("{}: {:?}", order.id, order.status);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod cookies;
mod endpoints;
mod instance;
mod recovery;
mod transport;

pub use client::{ClientConfig, StorefrontClient};
pub use cookies::{SessionStore, StoredCookie};
pub use endpoints::REFRESH;
pub use instance::ApiInstance;
pub use recovery::RecoveryPolicy;
pub use transport::HttpTransport;

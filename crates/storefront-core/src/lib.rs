//! storefront-core - Core types and traits for the storefront session client.
//!
//! This crate is transport-independent: it defines the request descriptor,
//! the error taxonomy, and the [`Transport`] seam that HTTP backends implement.

pub mod credentials;
pub mod error;
pub mod models;
pub mod request;
pub mod traits;
pub mod types;

pub use credentials::{Credentials, Registration};
pub use error::Error;
pub use request::{ApiResponse, Attempt, Method, RequestDescriptor};
pub use traits::Transport;
pub use types::{ApiUrl, Area, AreaPaths};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

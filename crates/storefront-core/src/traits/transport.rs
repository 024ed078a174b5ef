//! Transport trait.

use async_trait::async_trait;

use crate::Result;
use crate::request::{ApiResponse, RequestDescriptor};

/// Sends a request once against a fixed base URL.
///
/// Implementations attach the session credential themselves (for HTTP this
/// is the cookie store wired into the client). A non-2xx status must be
/// returned as [`Error::Http`](crate::Error::Http) and a network failure as
/// [`Error::Transport`](crate::Error::Transport).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Returns the base URL requests are resolved against.
    fn base(&self) -> &str;

    /// Send the request.
    async fn execute(&self, request: &RequestDescriptor) -> Result<ApiResponse>;
}

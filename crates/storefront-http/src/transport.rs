//! reqwest-backed transport.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument, trace};

use storefront_core::error::{HttpError, TransportError};
use storefront_core::{ApiResponse, Error, Method, RequestDescriptor, Result, Transport};

use crate::cookies::SessionStore;

/// An HTTP transport bound to one base URL.
///
/// When credential forwarding is enabled the underlying client uses the
/// shared [`SessionStore`] as its cookie provider: stored cookies go out on
/// every request and `Set-Cookie` responses update the store.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base: String,
    forwards_credentials: bool,
}

impl HttpTransport {
    /// Create a transport for `base` with its own reqwest client.
    ///
    /// The client only gets `store` as its cookie provider when
    /// `forwards_credentials` is set. Without it, no `Cookie` header is sent
    /// and `Set-Cookie` responses leave the store untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(
        base: impl Into<String>,
        store: &Arc<SessionStore>,
        forwards_credentials: bool,
        timeout: Option<Duration>,
        user_agent: &str,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(user_agent);
        if forwards_credentials {
            builder = builder.cookie_provider(store.clone());
        }
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(transport_error)?;

        Ok(Self {
            client,
            base: base.into(),
            forwards_credentials,
        })
    }

    /// Check if requests carry the session credential.
    pub fn forwards_credentials(&self) -> bool {
        self.forwards_credentials
    }

    fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            self.base.clone()
        } else {
            format!("{}/{}", self.base.trim_end_matches('/'), path)
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn base(&self) -> &str {
        &self.base
    }

    #[instrument(skip(self, request), fields(base = %self.base, forwards = self.forwards_credentials, method = %request.method(), path = request.path()))]
    async fn execute(&self, request: &RequestDescriptor) -> Result<ApiResponse> {
        let url = self.url(request.path());
        debug!(%url, "Sending request");

        let mut builder = self.client.request(to_reqwest(request.method()), &url);
        if !request.query().is_empty() {
            builder = builder.query(request.query());
        }
        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        trace!(status = %status, "Response received");

        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.bytes().await.map_err(transport_error)?;

        if status.is_success() {
            Ok(ApiResponse::new(status.as_u16(), headers, body.to_vec()))
        } else {
            let error = HttpError::new(status.as_u16(), String::from_utf8_lossy(&body));
            debug!(%error, "Request failed");
            Err(Error::Http(error))
        }
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

/// Map a reqwest failure onto the transport taxonomy.
pub(crate) fn transport_error(err: reqwest::Error) -> Error {
    let err = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Other {
            message: err.to_string(),
        }
    };
    Error::Transport(err)
}

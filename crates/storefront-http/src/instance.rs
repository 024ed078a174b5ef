//! Named transport instances.

use std::fmt;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use storefront_core::{ApiResponse, Area, Attempt, RequestDescriptor, Result, Transport};

use crate::recovery::RecoveryPolicy;

/// A transport bound to one resource area.
///
/// Instances of authenticated areas carry the shared [`RecoveryPolicy`];
/// the public instance carries none, so its failures are always terminal.
/// Cloning is cheap and clones share the transport and policy.
#[derive(Clone)]
pub struct ApiInstance {
    area: Area,
    transport: Arc<dyn Transport>,
    policy: Option<Arc<RecoveryPolicy>>,
}

impl ApiInstance {
    /// Create an instance with no recovery policy.
    pub fn new(area: Area, transport: Arc<dyn Transport>) -> Self {
        Self {
            area,
            transport,
            policy: None,
        }
    }

    /// Create an instance whose failures are routed through `policy`.
    pub fn with_policy(area: Area, transport: Arc<dyn Transport>, policy: Arc<RecoveryPolicy>) -> Self {
        Self {
            area,
            transport,
            policy: Some(policy),
        }
    }

    pub fn area(&self) -> Area {
        self.area
    }

    /// Returns the base URL of this instance.
    pub fn base(&self) -> &str {
        self.transport.base()
    }

    /// Check if failures of this instance may trigger session renewal.
    pub fn recovers(&self) -> bool {
        self.policy.is_some()
    }

    /// Send a request, renewing the session and replaying once if needed.
    ///
    /// # Errors
    ///
    /// Returns the request's own failure, the replay's failure, or the
    /// renewal's failure when renewal is denied.
    pub async fn send(&self, request: &RequestDescriptor) -> Result<ApiResponse> {
        self.dispatch(request, Attempt::Initial).await
    }

    /// Send a request and decode the JSON response.
    ///
    /// # Errors
    ///
    /// As [`send`](Self::send), plus a decode error for unexpected bodies.
    pub async fn json<R: DeserializeOwned>(&self, request: &RequestDescriptor) -> Result<R> {
        self.send(request).await?.json()
    }

    /// `GET` a path and decode the JSON response.
    ///
    /// # Errors
    ///
    /// As [`json`](Self::json).
    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        self.json(&RequestDescriptor::get(path)).await
    }

    /// `POST` a JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// As [`json`](Self::json), plus an input error for unserializable bodies.
    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.json(&RequestDescriptor::post(path).with_json(body)?).await
    }

    /// `PUT` a JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// As [`post`](Self::post).
    pub async fn put<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.json(&RequestDescriptor::put(path).with_json(body)?).await
    }

    /// `PATCH` a JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// As [`post`](Self::post).
    pub async fn patch<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.json(&RequestDescriptor::patch(path).with_json(body)?).await
    }

    /// `DELETE` a path, discarding the response body.
    ///
    /// # Errors
    ///
    /// As [`send`](Self::send).
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.send(&RequestDescriptor::delete(path)).await.map(|_| ())
    }

    /// One pass through the response pipeline.
    ///
    /// Boxed because a replay re-enters the pipeline through the policy.
    pub(crate) fn dispatch<'a>(
        &'a self,
        request: &'a RequestDescriptor,
        attempt: Attempt,
    ) -> BoxFuture<'a, Result<ApiResponse>> {
        Box::pin(async move {
            match self.transport.execute(request).await {
                Ok(response) => Ok(response),
                Err(error) => match &self.policy {
                    Some(policy) => policy.on_failure(error, request, attempt, self).await,
                    None => {
                        debug!(area = %self.area, %request, %error, "Request failed without recovery");
                        Err(error)
                    }
                },
            }
        })
    }
}

impl fmt::Debug for ApiInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiInstance")
            .field("area", &self.area)
            .field("base", &self.transport.base())
            .field("recovers", &self.recovers())
            .finish()
    }
}

//! Unauthorized-response recovery.
//!
//! One policy is shared by every authenticated instance. A 401 or 403 on a
//! first attempt renews the session through the public transport and then
//! replays the original request once through the instance that sent it.
//! Concurrent failures each renew independently; renewal is idempotent on
//! the server, so redundant calls are accepted rather than coordinated.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use storefront_core::error::AuthError;
use storefront_core::{ApiResponse, Attempt, Error, RequestDescriptor, Result, Transport};

use crate::endpoints::REFRESH;
use crate::instance::ApiInstance;

/// Decides whether a failed request is retried after renewing the session.
pub struct RecoveryPolicy {
    public: Arc<dyn Transport>,
    renewal_path: String,
}

impl RecoveryPolicy {
    /// Create a policy that renews through `public` at [`REFRESH`].
    pub fn new(public: Arc<dyn Transport>) -> Self {
        Self::with_renewal_path(public, REFRESH)
    }

    /// Create a policy with a non-default renewal path.
    pub fn with_renewal_path(public: Arc<dyn Transport>, renewal_path: impl Into<String>) -> Self {
        Self {
            public,
            renewal_path: renewal_path.into(),
        }
    }

    pub fn renewal_path(&self) -> &str {
        &self.renewal_path
    }

    /// Handle a failure from `owner`.
    ///
    /// Returns the error unchanged unless it is a 401/403 on a first attempt
    /// of anything other than the renewal endpoint. Otherwise renews and
    /// returns the replay's outcome.
    ///
    /// # Errors
    ///
    /// The original error when recovery does not apply,
    /// [`AuthError::RenewalDenied`] when the renewal endpoint answers with a
    /// failure status, the renewal's transport error on network failure, or
    /// the replay's own error.
    #[instrument(skip_all, fields(area = %owner.area(), %request, ?attempt))]
    pub async fn on_failure(
        &self,
        error: Error,
        request: &RequestDescriptor,
        attempt: Attempt,
        owner: &ApiInstance,
    ) -> Result<ApiResponse> {
        if !error.is_session_error() {
            debug!(%error, "Not a session error; passing through");
            return Err(error);
        }
        if attempt.is_replay() {
            debug!(%error, "Replay rejected; not renewing again");
            return Err(error);
        }
        if request.targets(&self.renewal_path) {
            debug!(%error, "Renewal endpoint failure is terminal");
            return Err(error);
        }

        info!(%error, "Session rejected; renewing");
        self.renew().await?;

        debug!("Session renewed; replaying request");
        owner.dispatch(request, Attempt::Replay).await
    }

    /// Ask the server for a fresh session credential.
    ///
    /// # Errors
    ///
    /// [`AuthError::RenewalDenied`] when the server refuses, or the transport
    /// error when the endpoint cannot be reached.
    pub async fn renew(&self) -> Result<()> {
        let request = RequestDescriptor::post(self.renewal_path.as_str());
        match self.public.execute(&request).await {
            Ok(_) => Ok(()),
            Err(Error::Http(denied)) => {
                warn!(status = denied.status, "Session renewal denied");
                Err(AuthError::RenewalDenied(denied).into())
            }
            Err(error) => {
                warn!(%error, "Session renewal failed");
                Err(error)
            }
        }
    }
}

impl fmt::Debug for RecoveryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecoveryPolicy")
            .field("public", &self.public.base())
            .field("renewal_path", &self.renewal_path)
            .finish()
    }
}

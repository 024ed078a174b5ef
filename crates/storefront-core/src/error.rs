//! Error types for the storefront client.
//!
//! The variants mirror how a failure should be handled: transport failures
//! and ordinary HTTP errors surface unchanged, 401/403 responses are session
//! errors eligible for renewal, and a failed renewal is terminal.

use std::fmt;
use thiserror::Error;

/// The unified error type for storefront operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The server answered with a non-2xx status.
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    /// Session errors that cannot be recovered by renewal.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// A successful response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Input validation errors (bad URL, unserializable body).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns the HTTP status associated with this error, if any.
    ///
    /// For a denied renewal this is the renewal endpoint's status, not the
    /// status of the request that triggered it.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http(e) => Some(e.status),
            Error::Auth(AuthError::RenewalDenied(e)) => Some(e.status),
            _ => None,
        }
    }

    /// Check if this error should trigger session renewal.
    pub fn is_session_error(&self) -> bool {
        matches!(self, Error::Http(e) if e.is_session_error())
    }

    /// Check if this error is a denied renewal.
    pub fn is_renewal_denied(&self) -> bool {
        matches!(self, Error::Auth(AuthError::RenewalDenied(_)))
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Any other failure while sending or reading the request.
    #[error("request failed: {message}")]
    Other { message: String },
}

/// A non-2xx response from the backend.
#[derive(Debug, Clone)]
pub struct HttpError {
    /// HTTP status code.
    pub status: u16,
    /// Error message reported by the server (if present).
    pub message: Option<String>,
    /// Raw response body.
    pub body: String,
}

impl HttpError {
    /// Create a new HTTP error, extracting a message from a JSON body when present.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message.or(b.error));
        Self {
            status,
            message,
            body,
        }
    }

    /// Check if the status means the session is missing, expired or insufficient.
    pub fn is_session_error(&self) -> bool {
        self.status == 401 || self.status == 403
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for HttpError {}

/// Express-style JSON error body.
#[derive(serde::Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Authentication errors that end the session.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The renewal endpoint refused to issue a fresh credential.
    #[error("session renewal denied ({0})")]
    RenewalDenied(HttpError),

    /// No stored session is available.
    #[error("no active session")]
    NoSession,
}

/// Response body decoding errors.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct DecodeError {
    pub message: String,
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(DecodeError::from(err))
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Invalid request body.
    #[error("invalid request body: {reason}")]
    Body { reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_reads_message_from_json_body() {
        let err = HttpError::new(401, r#"{"message":"Not authorized, token failed"}"#);
        assert_eq!(err.message.as_deref(), Some("Not authorized, token failed"));
        assert_eq!(err.to_string(), "HTTP 401: Not authorized, token failed");
    }

    #[test]
    fn http_error_tolerates_plain_body() {
        let err = HttpError::new(502, "Bad Gateway");
        assert!(err.message.is_none());
        assert_eq!(err.body, "Bad Gateway");
    }

    #[test]
    fn only_401_and_403_are_session_errors() {
        assert!(Error::from(HttpError::new(401, "")).is_session_error());
        assert!(Error::from(HttpError::new(403, "")).is_session_error());
        assert!(!Error::from(HttpError::new(404, "")).is_session_error());
        assert!(!Error::from(HttpError::new(500, "")).is_session_error());
        assert!(!Error::from(TransportError::Timeout).is_session_error());
    }

    #[test]
    fn renewal_denied_is_terminal_but_keeps_status() {
        let err = Error::from(AuthError::RenewalDenied(HttpError::new(401, "")));
        assert!(!err.is_session_error());
        assert!(err.is_renewal_denied());
        assert_eq!(err.status(), Some(401));
    }
}

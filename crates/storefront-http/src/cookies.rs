//! Scoped session credential store.
//!
//! The backend keeps the session in HTTP-only cookies. Rather than relying on
//! an ambient cookie jar, every client owns a [`SessionStore`] bound to one
//! backend origin. The store is wired into reqwest as its cookie provider, so
//! credentials are attached and renewed by the transport, while the access
//! points below are the only way application code reads or changes them.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{PoisonError, RwLock};

use cookie::Cookie;
use cookie::time::{Duration, OffsetDateTime};
use reqwest::Url;
use reqwest::cookie::CookieStore;
use reqwest::header::HeaderValue;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use url::Origin;

use storefront_core::ApiUrl;

/// A cookie captured for persistence.
///
/// # Security
///
/// The value is a session credential; it is never shown in Debug output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCookie {
    pub name: String,
    pub value: String,
}

impl fmt::Debug for StoredCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredCookie")
            .field("name", &self.name)
            .field("value", &"[REDACTED]")
            .finish()
    }
}

/// Cookie store holding the session credential for one backend origin.
pub struct SessionStore {
    origin: Origin,
    cookies: RwLock<BTreeMap<String, String>>,
}

impl SessionStore {
    /// Create an empty store scoped to the origin of `api`.
    pub fn new(api: &ApiUrl) -> Self {
        Self {
            origin: api.as_url().origin(),
            cookies: RwLock::new(BTreeMap::new()),
        }
    }

    /// Create a store pre-filled with persisted cookies.
    pub fn restore(api: &ApiUrl, cookies: impl IntoIterator<Item = StoredCookie>) -> Self {
        let store = Self::new(api);
        for cookie in cookies {
            store.insert(cookie.name, cookie.value);
        }
        store
    }

    /// Check if any credential is held.
    pub fn has_session(&self) -> bool {
        !self.read().is_empty()
    }

    /// Returns the names of the held cookies.
    pub fn names(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    /// Store or replace a cookie.
    pub fn insert(&self, name: impl Into<String>, value: impl Into<String>) {
        self.write().insert(name.into(), value.into());
    }

    /// Remove a cookie, returning whether it was present.
    pub fn remove(&self, name: &str) -> bool {
        self.write().remove(name).is_some()
    }

    /// Drop every held credential.
    pub fn clear(&self) {
        self.write().clear();
        debug!("Session store cleared");
    }

    /// Export the held cookies for persistence.
    ///
    /// # Security
    ///
    /// The snapshot contains live session credentials.
    pub fn snapshot(&self) -> Vec<StoredCookie> {
        self.read()
            .iter()
            .map(|(name, value)| StoredCookie {
                name: name.clone(),
                value: value.clone(),
            })
            .collect()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<String, String>> {
        self.cookies.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, BTreeMap<String, String>> {
        self.cookies.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply one `Set-Cookie` header.
    ///
    /// The value is kept exactly as sent, quotes included, so the `Cookie`
    /// header echoes what the server set.
    fn apply(&self, header: &str) {
        let Some(set) = SetCookie::parse(header, OffsetDateTime::now_utc()) else {
            trace!("Ignoring malformed Set-Cookie header");
            return;
        };

        let name = set.cookie.name();
        if set.expired {
            if self.remove(name) {
                debug!(name, "Session cookie removed by server");
            }
        } else {
            debug!(name, "Session cookie stored");
            self.insert(name, set.cookie.value());
        }
    }
}

impl CookieStore for SessionStore {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        if url.origin() != self.origin {
            return;
        }
        for header in cookie_headers {
            if let Ok(header) = header.to_str() {
                self.apply(header);
            }
        }
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        if url.origin() != self.origin {
            return None;
        }
        let cookies = self.read();
        if cookies.is_empty() {
            return None;
        }
        let header = cookies
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("; ");
        HeaderValue::from_str(&header).ok()
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("origin", &self.origin.ascii_serialization())
            .field("cookies", &self.names())
            .finish()
    }
}

/// A parsed `Set-Cookie` header and whether it clears the credential.
struct SetCookie<'a> {
    cookie: Cookie<'a>,
    expired: bool,
}

impl<'a> SetCookie<'a> {
    fn parse(header: &'a str, now: OffsetDateTime) -> Option<Self> {
        let cookie = Cookie::parse(header).ok()?;

        // Max-Age overrides Expires (RFC 6265 5.3).
        let expired = cookie.value().is_empty()
            || match cookie.max_age() {
                Some(max_age) => max_age <= Duration::ZERO,
                None => cookie.expires_datetime().is_some_and(|at| at <= now),
            };

        Some(Self { cookie, expired })
    }
}

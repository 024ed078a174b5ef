//! Backend resource areas.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// A backend resource area, each served under its own base path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Area {
    Auth,
    Admin,
    User,
    Product,
    /// Unauthenticated endpoints, including session renewal.
    Public,
}

impl Area {
    /// Areas whose instances recover from 401/403 by renewing the session.
    pub const AUTHENTICATED: [Area; 4] = [Area::Auth, Area::Admin, Area::User, Area::Product];

    /// Returns the lowercase name of the area.
    pub fn as_str(&self) -> &'static str {
        match self {
            Area::Auth => "auth",
            Area::Admin => "admin",
            Area::User => "user",
            Area::Product => "product",
            Area::Public => "public",
        }
    }

    /// Returns the default base path for the area.
    pub fn default_base_path(&self) -> &'static str {
        match self {
            Area::Auth => "/api/auth",
            Area::Admin => "/api/admin",
            Area::User => "/api/user",
            Area::Product => "/api/product",
            Area::Public => "/api/public",
        }
    }

    /// Check if requests in this area go through the recovery policy.
    pub fn is_authenticated(&self) -> bool {
        Self::AUTHENTICATED.contains(self)
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Area {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auth" => Ok(Area::Auth),
            "admin" => Ok(Area::Admin),
            "user" => Ok(Area::User),
            "product" => Ok(Area::Product),
            "public" => Ok(Area::Public),
            other => Err(InvalidInputError::Other {
                message: format!("unknown area '{}'", other),
            }
            .into()),
        }
    }
}

/// Base path for every area, overridable per deployment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaPaths {
    pub auth: String,
    pub admin: String,
    pub user: String,
    pub product: String,
    pub public: String,
}

impl AreaPaths {
    /// Returns the configured base path for an area.
    pub fn get(&self, area: Area) -> &str {
        match area {
            Area::Auth => &self.auth,
            Area::Admin => &self.admin,
            Area::User => &self.user,
            Area::Product => &self.product,
            Area::Public => &self.public,
        }
    }
}

impl Default for AreaPaths {
    fn default() -> Self {
        Self {
            auth: Area::Auth.default_base_path().to_string(),
            admin: Area::Admin.default_base_path().to_string(),
            user: Area::User.default_base_path().to_string(),
            product: Area::Product.default_base_path().to_string(),
            public: Area::Public.default_base_path().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_is_the_only_unauthenticated_area() {
        assert!(!Area::Public.is_authenticated());
        assert!(Area::AUTHENTICATED.iter().all(Area::is_authenticated));
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Admin".parse::<Area>().unwrap(), Area::Admin);
        assert!("orders".parse::<Area>().is_err());
    }

    #[test]
    fn partial_paths_fill_in_defaults() {
        let paths: AreaPaths = serde_json::from_str(r#"{"user":"/v2/user"}"#).unwrap();
        assert_eq!(paths.get(Area::User), "/v2/user");
        assert_eq!(paths.get(Area::Public), "/api/public");
    }
}

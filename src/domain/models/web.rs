use std::fmt;
use std::time::Duration;

use serde::Serialize;

use super::{redact, REDACTED};

/// Bootstrap administrator account
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct AdminCredentials {
    login: String,
    #[serde(serialize_with = "redact")]
    password: String,
}

impl AdminCredentials {
    pub(crate) const fn new(login: String, password: String) -> Self {
        Self { login, password }
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("login", &self.login)
            .field("password", &REDACTED)
            .finish()
    }
}

/// Origins allowed to make cross-origin requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AllowedOrigins {
    /// `*`
    Any,
    List(Vec<String>),
}

impl AllowedOrigins {
    /// Value for `Access-Control-Allow-Origin` given the request's `Origin`.
    ///
    /// An explicit list echoes a matching origin back; anything else gets no header.
    pub fn allow_origin_header<'a>(&self, origin: &'a str) -> Option<&'a str> {
        match self {
            Self::Any => Some("*"),
            Self::List(origins) => {
                (!origin.is_empty() && origins.iter().any(|o| o == origin)).then_some(origin)
            }
        }
    }
}

/// CORS policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorsSettings {
    pub allow_origins: AllowedOrigins,
    pub max_age_secs: u32,
}

/// Session token policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionSettings {
    pub lifetime_secs: u64,
    pub secure: bool,
}

impl SessionSettings {
    pub const fn lifetime(&self) -> Duration {
        Duration::from_secs(self.lifetime_secs)
    }
}

/// List endpoint limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationSettings {
    pub default_limit: u32,
    pub max_limit: u32,
}

impl PaginationSettings {
    /// Effective page size for a requested `limit`.
    pub fn effective_limit(&self, requested: Option<u32>) -> u32 {
        match requested {
            None | Some(0) => self.default_limit,
            Some(limit) => limit.min(self.max_limit),
        }
    }
}

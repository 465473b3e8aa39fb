//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::config::{env_bool_or, env_or, env_secs_or};
use platform::cookie::CookieConfig;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Extra lifetime given to the cookie beyond the server-side TTL, so the
/// browser never drops the cookie before the session itself expires
pub const SESSION_COOKIE_BUFFER: Duration = Duration::from_secs(60);

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Sliding session TTL (18 minutes)
    pub session_ttl: Duration,
    /// Whether to mark the cookie `Secure`
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "HydraWatch".to_string(),
            session_ttl: Duration::from_secs(1080),
            cookie_secure: false,
            cookie_same_site: SameSite::Lax,
        }
    }
}

impl AuthConfig {
    /// Read `SESSION_COOKIE_NAME`, `SESSION_TTL_SECS` and `COOKIE_SECURE`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            session_cookie_name: env_or("SESSION_COOKIE_NAME", &defaults.session_cookie_name),
            session_ttl: env_secs_or("SESSION_TTL_SECS", defaults.session_ttl.as_secs()),
            cookie_secure: env_bool_or("COOKIE_SECURE", defaults.cookie_secure),
            cookie_same_site: defaults.cookie_same_site,
        }
    }

    /// Cookie `Max-Age`: session TTL plus [`SESSION_COOKIE_BUFFER`]
    pub fn cookie_max_age_secs(&self) -> u64 {
        (self.session_ttl + SESSION_COOKIE_BUFFER).as_secs()
    }

    /// Cookie attributes used both at issuance and on every refresh
    pub fn session_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.cookie_max_age_secs()),
        }
    }
}

//! Proxy Configuration

use std::time::Duration;

use platform::config::{env_opt, env_or, env_parse_or, env_secs_or};

use crate::domain::route_rule::RouteTable;

/// Path prefix of the backend API passthrough
pub const API_ROUTER_PREFIX: &str = "/api/router";

/// Paths under this prefix get JSON errors instead of login redirects
pub const API_PREFIX: &str = "/api/";

/// Where unauthenticated page requests are sent
pub const LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Backend content service, e.g. `http://127.0.0.1:8000`
    pub backend_origin: String,
    /// Frontend page server; unset means unmatched routes answer 404
    pub frontend_origin: Option<String>,
    /// Per-request timeout for every upstream call
    pub upstream_timeout: Duration,
    /// Maximum accepted `POST /file` body
    pub upload_max_bytes: usize,
    pub routes: RouteTable,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            backend_origin: "http://127.0.0.1:8000".to_string(),
            frontend_origin: None,
            upstream_timeout: Duration::from_secs(30),
            upload_max_bytes: 10 * 1024 * 1024,
            routes: RouteTable::default(),
        }
    }
}

impl ProxyConfig {
    /// Read `BACKEND_ORIGIN`, `FRONTEND_ORIGIN`, `UPSTREAM_TIMEOUT_SECS` and
    /// `UPLOAD_MAX_BYTES`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend_origin: trim_origin(&env_or("BACKEND_ORIGIN", &defaults.backend_origin)),
            frontend_origin: env_opt("FRONTEND_ORIGIN").map(|origin| trim_origin(&origin)),
            upstream_timeout: env_secs_or(
                "UPSTREAM_TIMEOUT_SECS",
                defaults.upstream_timeout.as_secs(),
            ),
            upload_max_bytes: env_parse_or("UPLOAD_MAX_BYTES", defaults.upload_max_bytes),
            routes: defaults.routes,
        }
    }

    pub fn with_backend_origin(mut self, origin: impl AsRef<str>) -> Self {
        self.backend_origin = trim_origin(origin.as_ref());
        self
    }

    pub fn with_frontend_origin(mut self, origin: impl AsRef<str>) -> Self {
        self.frontend_origin = Some(trim_origin(origin.as_ref()));
        self
    }

    /// Backend URL for a request under [`API_ROUTER_PREFIX`].
    ///
    /// The prefix is stripped (nothing left becomes `/`) and the query is
    /// appended verbatim.
    pub fn backend_api_url(&self, path: &str, query: Option<&str>) -> String {
        let stripped = path.strip_prefix(API_ROUTER_PREFIX).unwrap_or(path);
        let stripped = if stripped.is_empty() { "/" } else { stripped };
        join_url(&self.backend_origin, stripped, query)
    }

    /// Backend URL that receives CSV imports for `user_name`
    pub fn csv_import_url(&self, user_name: &str) -> String {
        format!(
            "{}/csv/import/{}",
            self.backend_origin,
            urlencoding::encode(user_name)
        )
    }

    /// Frontend URL for a page request, if a frontend is configured
    pub fn frontend_url(&self, path: &str, query: Option<&str>) -> Option<String> {
        self.frontend_origin
            .as_deref()
            .map(|origin| join_url(origin, path, query))
    }
}

fn trim_origin(origin: &str) -> String {
    origin.trim().trim_end_matches('/').to_string()
}

fn join_url(origin: &str, path: &str, query: Option<&str>) -> String {
    match query {
        Some(query) => format!("{origin}{path}?{query}"),
        None => format!("{origin}{path}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_api_url() {
        let config = ProxyConfig::default();
        assert_eq!(
            config.backend_api_url("/api/router/dashboard/alice123/movies", None),
            "http://127.0.0.1:8000/dashboard/alice123/movies"
        );
        assert_eq!(
            config.backend_api_url("/api/router/videos", Some("cache_bust=123&x=%20")),
            "http://127.0.0.1:8000/videos?cache_bust=123&x=%20"
        );
        assert_eq!(
            config.backend_api_url("/api/router", None),
            "http://127.0.0.1:8000/"
        );
        assert_eq!(
            config.backend_api_url("/api/router/", None),
            "http://127.0.0.1:8000/"
        );
    }

    #[test]
    fn test_csv_import_url_is_encoded() {
        let config = ProxyConfig::default().with_backend_origin("http://backend:8000/");
        assert_eq!(
            config.csv_import_url("alice123"),
            "http://backend:8000/csv/import/alice123"
        );
        assert_eq!(
            config.csv_import_url("a b/c"),
            "http://backend:8000/csv/import/a%20b%2Fc"
        );
    }

    #[test]
    fn test_frontend_url() {
        assert_eq!(ProxyConfig::default().frontend_url("/login", None), None);
        let config = ProxyConfig::default().with_frontend_origin("http://127.0.0.1:3001");
        assert_eq!(
            config.frontend_url("/login", Some("callbackUrl=%2F")).as_deref(),
            Some("http://127.0.0.1:3001/login?callbackUrl=%2F")
        );
    }
}

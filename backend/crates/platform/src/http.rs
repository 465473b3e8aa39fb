//! Outbound HTTP Client
//!
//! One `reqwest::Client` is built at startup and shared; it pools
//! connections to the backend content service.

use std::time::Duration;

/// Outbound client settings
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// TCP connect timeout
    pub connect_timeout: Duration,
    /// How long idle pooled connections are kept
    pub pool_idle_timeout: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            pool_idle_timeout: Duration::from_secs(90),
        }
    }
}

/// Build the shared client.
///
/// Redirects are never followed: a backend 3xx is handed to the browser
/// as-is. Per-request timeouts are set by callers.
pub fn build_client(config: &HttpClientConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .connect_timeout(config.connect_timeout)
        .pool_idle_timeout(config.pool_idle_timeout)
        .redirect(reqwest::redirect::Policy::none())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_client_default() {
        assert!(build_client(&HttpClientConfig::default()).is_ok());
    }
}

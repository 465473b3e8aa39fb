//! Gateway Settings
//!
//! Everything the binary reads from the environment, resolved once at
//! startup.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use auth::AuthConfig;
use platform::config::{env_list, env_millis_or, env_or, env_parse_or};
use proxy::ProxyConfig;

/// Which key-value store backs credentials and sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Redis,
    /// Process-local, lost on restart. Development only.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown store backend: {other}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub backend: StoreBackend,
    pub redis_url: String,
    pub credentials_db: u8,
    pub sessions_db: u8,
    pub op_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub listen_addr: SocketAddr,
    pub store: StoreSettings,
    /// Allowed CORS origins; empty disables the CORS layer
    pub cors_origins: Vec<String>,
    pub auth: AuthConfig,
    pub proxy: ProxyConfig,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        let listen_addr = env_or("LISTEN_ADDR", "0.0.0.0:3000")
            .parse()
            .map_err(|e| anyhow::anyhow!("LISTEN_ADDR is not a socket address: {e}"))?;

        let backend = env_or("STORE_BACKEND", "redis")
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))?;

        let store = StoreSettings {
            backend,
            redis_url: env_or("REDIS_URL", "redis://127.0.0.1:6379"),
            credentials_db: env_parse_or("REDIS_CREDENTIALS_DB", 0),
            sessions_db: env_parse_or("REDIS_SESSIONS_DB", 1),
            op_timeout: env_millis_or("STORE_TIMEOUT_MS", 2000),
        };

        if store.backend == StoreBackend::Redis && store.credentials_db == store.sessions_db {
            anyhow::bail!(
                "REDIS_CREDENTIALS_DB and REDIS_SESSIONS_DB must differ (both are {})",
                store.credentials_db
            );
        }

        Ok(Self {
            listen_addr,
            store,
            cors_origins: env_list("CORS_ORIGINS"),
            auth: AuthConfig::from_env(),
            proxy: ProxyConfig::from_env(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_backend_parse() {
        assert_eq!("redis".parse::<StoreBackend>(), Ok(StoreBackend::Redis));
        assert_eq!(" Memory ".parse::<StoreBackend>(), Ok(StoreBackend::Memory));
        assert!("postgres".parse::<StoreBackend>().is_err());
    }
}

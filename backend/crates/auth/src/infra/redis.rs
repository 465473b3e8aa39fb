//! Redis Key-Value Store
//!
//! One [`RedisStore`] is bound to one logical database. The gateway opens
//! two: credentials in db 0, sessions in db 1.
//!
//! Each command is bounded by `op_timeout`; a slow or unreachable server
//! surfaces as [`StoreError`] instead of hanging the request. Commands are
//! never retried here.

use std::future::Future;
use std::time::Duration;

use redis::aio::ConnectionManager;
use redis::{Client, RedisError};

use crate::domain::repository::{KeyValueStore, StoreError, StoreResult};

/// Connection settings for one logical database
#[derive(Debug, Clone)]
pub struct RedisStoreConfig {
    /// Base URL without database suffix, e.g. `redis://127.0.0.1:6379`
    pub url: String,
    pub db: u8,
    pub op_timeout: Duration,
    pub connect_timeout: Duration,
}

impl RedisStoreConfig {
    pub fn new(url: impl Into<String>, db: u8) -> Self {
        Self {
            url: url.into(),
            db,
            op_timeout: Duration::from_secs(2),
            connect_timeout: Duration::from_secs(5),
        }
    }

    pub fn with_op_timeout(mut self, op_timeout: Duration) -> Self {
        self.op_timeout = op_timeout;
        self
    }

    /// Full URL including the database index
    fn database_url(&self) -> String {
        format!("{}/{}", self.url.trim_end_matches('/'), self.db)
    }
}

/// Redis-backed store handle (cheap to clone, multiplexed connection)
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
    db: u8,
    op_timeout: Duration,
}

impl RedisStore {
    /// Open the connection and verify it with `PING`
    pub async fn connect(config: &RedisStoreConfig) -> StoreResult<Self> {
        let client = Client::open(config.database_url()).map_err(map_redis_error)?;

        let conn = tokio::time::timeout(config.connect_timeout, client.get_connection_manager())
            .await
            .map_err(|_| StoreError::Timeout("connect"))?
            .map_err(map_redis_error)?;

        let store = Self {
            conn,
            db: config.db,
            op_timeout: config.op_timeout,
        };

        store.ping().await?;

        tracing::info!(db = config.db, "Connected to Redis");
        Ok(store)
    }

    pub async fn ping(&self) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        let pong: String = self
            .run("ping", redis::cmd("PING").query_async(&mut conn))
            .await?;

        if pong != "PONG" {
            return Err(StoreError::Command(format!("unexpected PING reply: {pong}")));
        }
        Ok(())
    }

    /// Release this handle. The multiplexed connection closes once the last
    /// clone is dropped.
    pub fn close(self) {
        tracing::info!(db = self.db, "Closing Redis connection");
        drop(self.conn);
    }

    async fn run<T, F>(&self, op: &'static str, fut: F) -> StoreResult<T>
    where
        F: Future<Output = Result<T, RedisError>>,
    {
        match tokio::time::timeout(self.op_timeout, fut).await {
            Ok(result) => result.map_err(map_redis_error),
            Err(_) => {
                tracing::warn!(db = self.db, op, "Redis operation timed out");
                Err(StoreError::Timeout(op))
            }
        }
    }
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore")
            .field("db", &self.db)
            .field("op_timeout", &self.op_timeout)
            .finish_non_exhaustive()
    }
}

fn map_redis_error(err: RedisError) -> StoreError {
    if err.is_timeout() {
        StoreError::Timeout("redis")
    } else if err.is_io_error() || err.is_connection_refusal() || err.is_connection_dropped() {
        StoreError::Connection(err.to_string())
    } else {
        StoreError::Command(err.to_string())
    }
}

impl KeyValueStore for RedisStore {
    async fn exists(&self, key: &str) -> StoreResult<bool> {
        let mut conn = self.conn.clone();
        let count: i64 = self
            .run(
                "exists",
                redis::cmd("EXISTS").arg(key).query_async(&mut conn),
            )
            .await?;
        Ok(count > 0)
    }

    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = self
            .run("get", redis::cmd("GET").arg(key).query_async(&mut conn))
            .await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        let mut cmd = redis::cmd("SET");
        cmd.arg(key).arg(value);
        if let Some(ttl) = ttl {
            cmd.arg("EX").arg(ttl.as_secs().max(1));
        }

        let _: () = self.run("set", cmd.query_async(&mut conn)).await?;
        Ok(())
    }

    async fn set_if_absent(&self, key: &str, value: &str) -> StoreResult<bool> {
        let mut conn = self.conn.clone();
        // Reply is `OK` when written, nil when the key already existed
        let reply: Option<String> = self
            .run(
                "set_if_absent",
                redis::cmd("SET")
                    .arg(key)
                    .arg(value)
                    .arg("NX")
                    .query_async(&mut conn),
            )
            .await?;
        Ok(reply.is_some())
    }

    async fn expire(&self, key: &str, ttl: Duration) -> StoreResult<bool> {
        let mut conn = self.conn.clone();
        let updated: i64 = self
            .run(
                "expire",
                redis::cmd("EXPIRE")
                    .arg(key)
                    .arg(ttl.as_secs().max(1))
                    .query_async(&mut conn),
            )
            .await?;
        Ok(updated == 1)
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        let _: i64 = self
            .run("delete", redis::cmd("DEL").arg(key).query_async(&mut conn))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_url() {
        assert_eq!(
            RedisStoreConfig::new("redis://127.0.0.1:6379", 1).database_url(),
            "redis://127.0.0.1:6379/1"
        );
        assert_eq!(
            RedisStoreConfig::new("redis://cache:6379/", 0).database_url(),
            "redis://cache:6379/0"
        );
    }

    #[test]
    fn test_default_timeouts() {
        let config = RedisStoreConfig::new("redis://localhost", 0);
        assert_eq!(config.op_timeout, Duration::from_secs(2));
        assert_eq!(
            config
                .with_op_timeout(Duration::from_millis(500))
                .op_timeout,
            Duration::from_millis(500)
        );
    }

    #[tokio::test]
    async fn test_connect_to_closed_port_fails() {
        // Nothing listens on port 1
        let config = RedisStoreConfig {
            connect_timeout: Duration::from_millis(500),
            ..RedisStoreConfig::new("redis://127.0.0.1:1", 0)
        };
        let err = RedisStore::connect(&config).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Connection(_) | StoreError::Timeout(_)
        ));
    }
}

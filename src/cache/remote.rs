//! Redis Cache Module
//!
//! Networked cache store: the same key-value and `INFO` interfaces, served by
//! an external Redis server through a reconnecting connection manager.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, RedisError};
use tracing::info;

use crate::cache::{CacheBackend, StatsSource};
use crate::error::{AppError, Result};

impl From<RedisError> for AppError {
    fn from(err: RedisError) -> Self {
        AppError::Cache(err.to_string())
    }
}

/// Cache backend and statistics source backed by a Redis server.
///
/// Clones share one multiplexed connection.
#[derive(Clone)]
pub struct RedisCache {
    connection: ConnectionManager,
}

impl RedisCache {
    /// Opens a managed connection to the server at `url`
    /// (e.g. `redis://127.0.0.1:6379/0`).
    pub async fn connect(url: &str) -> Result<Self> {
        let client = Client::open(url)?;
        let connection = ConnectionManager::new(client).await?;
        info!("Connected to Redis cache server");

        Ok(Self { connection })
    }
}

#[async_trait]
impl CacheBackend for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: String, ttl: u64) -> Result<()> {
        let mut conn = self.connection.clone();
        // SET EX rejects 0; a zero TTL means the entry is already gone.
        if ttl == 0 {
            let _: i64 = conn.del(key).await?;
            return Ok(());
        }
        let _: () = conn.set_ex(key, value, ttl).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.connection.clone();
        let removed: i64 = conn.del(key).await?;
        Ok(removed > 0)
    }
}

#[async_trait]
impl StatsSource for RedisCache {
    async fn info(&self, section: &str) -> Result<String> {
        let mut conn = self.connection.clone();
        let reply: String = redis::cmd("INFO")
            .arg(section)
            .query_async(&mut conn)
            .await?;
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_rejects_malformed_url() {
        let result = RedisCache::connect("not a redis url").await;

        match result {
            Err(AppError::Cache(msg)) => assert!(!msg.is_empty()),
            Err(other) => panic!("expected cache error, got {:?}", other),
            Ok(_) => panic!("malformed url should not connect"),
        }
    }

    #[tokio::test]
    async fn test_connect_rejects_unknown_scheme() {
        assert!(matches!(
            RedisCache::connect("http://127.0.0.1:6379").await,
            Err(AppError::Cache(_))
        ));
    }

    #[test]
    fn test_redis_error_maps_to_cache_error() {
        let err = RedisError::from((redis::ErrorKind::IoError, "Connection refused"));

        let mapped = AppError::from(err);

        assert!(matches!(mapped, AppError::Cache(_)));
        assert!(mapped.to_string().starts_with("Cache error:"));
        assert!(mapped.to_string().contains("Connection refused"));
    }
}

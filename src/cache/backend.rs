//! Cache Backend Module
//!
//! The two faces of the cache store used by the rest of the service: a plain
//! get/set/delete interface and an administrative statistics interface.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::CacheStore;
use crate::error::Result;

/// Key-value operations against the cache store.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Returns the live value for `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key` for `ttl` seconds.
    async fn set(&self, key: &str, value: String, ttl: u64) -> Result<()>;

    /// Removes `key`. Returns whether it existed; absence is not an error.
    async fn delete(&self, key: &str) -> Result<bool>;
}

/// Administrative access to the cache server's counters.
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Returns the raw reply to `INFO <section>`.
    async fn info(&self, section: &str) -> Result<String>;
}

// == Shared Cache ==
/// Handle to the in-process cache store, cloneable across handlers and tasks.
#[derive(Debug, Clone)]
pub struct SharedCache {
    inner: Arc<RwLock<CacheStore>>,
}

impl SharedCache {
    pub fn new(store: CacheStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Direct access to the underlying store, for the cleanup task.
    pub fn store(&self) -> Arc<RwLock<CacheStore>> {
        Arc::clone(&self.inner)
    }
}

#[async_trait]
impl CacheBackend for SharedCache {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        // Write lock: lookups update recency and counters.
        Ok(self.inner.write().await.get(key))
    }

    async fn set(&self, key: &str, value: String, ttl: u64) -> Result<()> {
        self.inner.write().await.set(key.to_string(), value, Some(ttl))
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.inner.write().await.delete(key))
    }
}

#[async_trait]
impl StatsSource for SharedCache {
    async fn info(&self, section: &str) -> Result<String> {
        self.inner.read().await.info(section)
    }
}

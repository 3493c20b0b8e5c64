//! TTL Cleanup Task
//!
//! Background sweep that purges expired cache entries, so keys nobody reads
//! again (old response-cache pages, an unread listing) do not sit in memory.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::SharedCache;

/// Spawns a task that purges expired entries every `cleanup_interval_secs`.
///
/// Returns the task's handle so shutdown can abort it.
pub fn spawn_cleanup_task(cache: SharedCache, cleanup_interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));
    let store = cache.store();

    tokio::spawn(async move {
        info!(
            "Starting TTL cleanup task with interval of {} seconds",
            interval.as_secs()
        );

        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let removed = store.write().await.cleanup_expired();
            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheBackend, CacheStore};

    #[tokio::test]
    async fn test_cleanup_task_purges_expired_entries() {
        let cache = SharedCache::new(CacheStore::new(100, 300));
        cache.set("page:/properties", "{}".to_string(), 0).await.unwrap();
        cache.set("all_properties", "[]".to_string(), 3600).await.unwrap();

        let handle = spawn_cleanup_task(cache.clone(), 1);
        tokio::time::sleep(Duration::from_millis(1500)).await;
        handle.abort();

        let store = cache.store();
        let store = store.read().await;
        assert_eq!(store.len(), 1);
        assert_eq!(store.stats().expired_keys, 1);
        assert!(store.ttl("all_properties").is_some());
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let cache = SharedCache::new(CacheStore::new(100, 300));

        let handle = spawn_cleanup_task(cache, 1);
        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}

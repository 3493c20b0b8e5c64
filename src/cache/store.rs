//! Cache Store Module
//!
//! In-process key-value engine: HashMap storage, LRU capacity eviction, lazy
//! and periodic TTL expiry, and Redis-style keyspace counters.

use std::collections::HashMap;
use std::time::Instant;

use crate::cache::{CacheEntry, LruTracker, StoreStats, MAX_KEY_LENGTH, MAX_VALUE_SIZE};
use crate::error::{AppError, Result};

// == Cache Store ==
/// Main cache storage with LRU eviction and TTL support.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// LRU access tracker
    lru: LruTracker,
    /// Cumulative counters
    stats: StoreStats,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// TTL in seconds applied when a write carries none
    default_ttl: u64,
    /// Largest value accepted by `set`, in bytes
    max_value_size: usize,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore with specified capacity and default TTL.
    pub fn new(max_entries: usize, default_ttl: u64) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: StoreStats::default(),
            max_entries,
            default_ttl,
            max_value_size: MAX_VALUE_SIZE,
        }
    }

    /// Caps accepted values at `bytes`, never above `MAX_VALUE_SIZE`.
    pub fn with_max_value_size(mut self, bytes: usize) -> Self {
        self.max_value_size = bytes.min(MAX_VALUE_SIZE);
        self
    }

    pub fn max_value_size(&self) -> usize {
        self.max_value_size
    }

    // == Set ==
    /// Stores a value, replacing any previous one and resetting its TTL.
    ///
    /// When a new key would exceed capacity, the least recently used key is
    /// evicted first.
    pub fn set(&mut self, key: String, value: String, ttl: Option<u64>) -> Result<()> {
        if key.is_empty() || key.len() > MAX_KEY_LENGTH {
            return Err(AppError::Cache(format!(
                "Key must be between 1 and {} bytes",
                MAX_KEY_LENGTH
            )));
        }
        if value.len() > self.max_value_size {
            return Err(AppError::Cache(format!(
                "Value for '{}' exceeds maximum size of {} bytes",
                key, self.max_value_size
            )));
        }
        if self.max_entries == 0 {
            return Err(AppError::Cache("Cache capacity is zero".to_string()));
        }

        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            match self.lru.evict_oldest() {
                Some(evicted) => {
                    self.entries.remove(&evicted);
                    self.stats.record_eviction();
                }
                None => {
                    return Err(AppError::Cache(
                        "Cache is full and eviction failed".to_string(),
                    ))
                }
            }
        }

        let entry = CacheEntry::new(value, Some(ttl.unwrap_or(self.default_ttl)));
        self.lru.touch(&key);
        self.entries.insert(key, entry);
        Ok(())
    }

    // == Get ==
    /// Returns the live value for a key.
    ///
    /// Expired entries are dropped on access; both that case and an absent key
    /// count as a keyspace miss.
    pub fn get(&mut self, key: &str) -> Option<String> {
        let expired = match self.entries.get(key) {
            None => {
                self.stats.record_miss();
                return None;
            }
            Some(entry) => entry.is_expired(),
        };

        if expired {
            self.entries.remove(key);
            self.lru.remove(key);
            self.stats.record_expired(1);
            self.stats.record_miss();
            return None;
        }

        self.stats.record_hit();
        self.lru.touch(key);
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Delete ==
    /// Removes a key. Returns whether a key was actually removed.
    pub fn delete(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_some() {
            self.lru.remove(key);
            true
        } else {
            false
        }
    }

    // == TTL ==
    /// Remaining lifetime of a live key in whole seconds.
    pub fn ttl(&self, key: &str) -> Option<u64> {
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .and_then(CacheEntry::ttl_remaining)
    }

    // == Stats ==
    /// Returns a snapshot of the cumulative counters.
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            keys: self.entries.len(),
            ..self.stats.clone()
        }
    }

    // == Info ==
    /// Answers an `INFO <section>` query. Only the `stats` section exists.
    pub fn info(&self, section: &str) -> Result<String> {
        if section.eq_ignore_ascii_case("stats") {
            Ok(self.stats().render_info())
        } else {
            Err(AppError::Cache(format!("Unknown INFO section '{}'", section)))
        }
    }

    // == Cleanup Expired ==
    /// Removes all expired entries and returns how many were dropped.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = Instant::now();
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.entries.remove(key);
            self.lru.remove(key);
        }

        self.stats.record_expired(expired_keys.len());
        expired_keys.len()
    }

    // == Length ==
    /// Returns the number of stored entries, expired-but-unpurged included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single stored value and its expiry deadline.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value
    pub value: String,
    /// Deadline after which the entry is dead, None = no expiration
    pub expires_at: Option<Instant>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl_seconds` from now.
    pub fn new(value: String, ttl_seconds: Option<u64>) -> Self {
        Self::created_at(value, ttl_seconds, Instant::now())
    }

    /// Creates an entry as if it had been written at `now`.
    pub fn created_at(value: String, ttl_seconds: Option<u64>, now: Instant) -> Self {
        Self {
            value,
            expires_at: ttl_seconds.map(|ttl| now + Duration::from_secs(ttl)),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Checks expiry against a given instant.
    ///
    /// An entry is dead once `now` reaches its deadline; a zero TTL therefore
    /// expires immediately.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| now >= deadline)
    }

    /// Remaining lifetime in whole seconds, or None without a TTL.
    pub fn ttl_remaining(&self) -> Option<u64> {
        self.expires_at
            .map(|deadline| deadline.saturating_duration_since(Instant::now()).as_secs())
    }
}

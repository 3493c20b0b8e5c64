//! Cache Statistics Module
//!
//! Server-side counters, reported through a Redis-style `INFO stats` section.

use std::fmt::Write;

// == Store Stats ==
/// Cumulative counters kept by the cache store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// Lookups that found a live key
    pub keyspace_hits: u64,
    /// Lookups that found nothing or an expired key
    pub keyspace_misses: u64,
    /// Keys removed because their TTL elapsed
    pub expired_keys: u64,
    /// Keys removed to make room under the capacity limit
    pub evicted_keys: u64,
    /// Live keys at the time of the snapshot
    pub keys: usize,
}

impl StoreStats {
    pub fn record_hit(&mut self) {
        self.keyspace_hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.keyspace_misses += 1;
    }

    pub fn record_expired(&mut self, count: usize) {
        self.expired_keys += count as u64;
    }

    pub fn record_eviction(&mut self) {
        self.evicted_keys += 1;
    }

    // == Render Info ==
    /// Renders the counters the way a Redis server answers `INFO stats`.
    pub fn render_info(&self) -> String {
        let mut out = String::from("# Stats\r\n");
        // Writing to a String cannot fail.
        let _ = write!(
            out,
            "keyspace_hits:{}\r\nkeyspace_misses:{}\r\nexpired_keys:{}\r\nevicted_keys:{}\r\nkeys:{}\r\n",
            self.keyspace_hits, self.keyspace_misses, self.expired_keys, self.evicted_keys, self.keys
        );
        out
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_start_at_zero() {
        let stats = StoreStats::default();
        assert_eq!(stats.keyspace_hits, 0);
        assert_eq!(stats.keyspace_misses, 0);
        assert_eq!(stats.expired_keys, 0);
        assert_eq!(stats.evicted_keys, 0);
    }

    #[test]
    fn test_record_counters() {
        let mut stats = StoreStats::default();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        stats.record_expired(3);
        stats.record_eviction();

        assert_eq!(stats.keyspace_hits, 2);
        assert_eq!(stats.keyspace_misses, 1);
        assert_eq!(stats.expired_keys, 3);
        assert_eq!(stats.evicted_keys, 1);
    }

    #[test]
    fn test_render_info_format() {
        let stats = StoreStats {
            keyspace_hits: 80,
            keyspace_misses: 20,
            expired_keys: 1,
            evicted_keys: 0,
            keys: 2,
        };
        let info = stats.render_info();

        assert!(info.starts_with("# Stats\r\n"));
        assert!(info.contains("keyspace_hits:80\r\n"));
        assert!(info.contains("keyspace_misses:20\r\n"));
        assert!(info.contains("keys:2\r\n"));
    }
}

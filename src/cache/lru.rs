//! LRU Tracker Module
//!
//! Orders keys by last access so the store can evict the coldest one.

use std::collections::{BTreeMap, HashMap};

// == LRU Tracker ==
/// Tracks access recency with a monotonically increasing tick per touch.
///
/// `by_tick` keeps ticks in ascending order, so its first entry is always the
/// least recently used key.
#[derive(Debug, Default)]
pub struct LruTracker {
    /// Latest tick for each tracked key
    ticks: HashMap<String, u64>,
    /// Tick -> key, oldest first
    by_tick: BTreeMap<u64, String>,
    /// Next tick to hand out
    clock: u64,
}

impl LruTracker {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as most recently used, tracking it if new.
    pub fn touch(&mut self, key: &str) {
        let tick = self.clock;
        self.clock += 1;

        if let Some(previous) = self.ticks.insert(key.to_string(), tick) {
            self.by_tick.remove(&previous);
        }
        self.by_tick.insert(tick, key.to_string());
    }

    // == Remove ==
    /// Stops tracking a key. Unknown keys are ignored.
    pub fn remove(&mut self, key: &str) {
        if let Some(tick) = self.ticks.remove(key) {
            self.by_tick.remove(&tick);
        }
    }

    // == Evict Oldest ==
    /// Removes and returns the least recently used key.
    pub fn evict_oldest(&mut self) -> Option<String> {
        let (_, key) = self.by_tick.pop_first()?;
        self.ticks.remove(&key);
        Some(key)
    }

    // == Peek Oldest ==
    #[cfg(test)]
    pub fn peek_oldest(&self) -> Option<&String> {
        self.by_tick.values().next()
    }

    // == Length ==
    /// Returns the number of tracked keys.
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    #[cfg(test)]
    pub fn contains(&self, key: &str) -> bool {
        self.ticks.contains_key(key)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lru_new_is_empty() {
        let mut lru = LruTracker::new();
        assert_eq!(lru.len(), 0);
        assert_eq!(lru.evict_oldest(), None);
    }

    #[test]
    fn test_touch_order_defines_eviction() {
        let mut lru = LruTracker::new();
        lru.touch("all_properties");
        lru.touch("page:/properties");
        lru.touch("other");

        assert_eq!(lru.peek_oldest(), Some(&"all_properties".to_string()));
        assert_eq!(lru.evict_oldest(), Some("all_properties".to_string()));
        assert_eq!(lru.evict_oldest(), Some("page:/properties".to_string()));
        assert_eq!(lru.len(), 1);
    }

    #[test]
    fn test_retouch_moves_key_to_back_of_queue() {
        let mut lru = LruTracker::new();
        lru.touch("a");
        lru.touch("b");
        lru.touch("c");
        lru.touch("a");

        assert_eq!(lru.len(), 3);
        assert_eq!(lru.evict_oldest(), Some("b".to_string()));
        assert_eq!(lru.evict_oldest(), Some("c".to_string()));
        assert_eq!(lru.evict_oldest(), Some("a".to_string()));
    }

    #[test]
    fn test_remove_untracks_key() {
        let mut lru = LruTracker::new();
        lru.touch("a");
        lru.touch("b");
        lru.remove("a");
        lru.remove("missing");

        assert!(!lru.contains("a"));
        assert!(lru.contains("b"));
        assert_eq!(lru.evict_oldest(), Some("b".to_string()));
    }

    #[test]
    fn test_repeated_touch_keeps_single_entry() {
        let mut lru = LruTracker::new();
        for _ in 0..5 {
            lru.touch("k");
        }
        assert_eq!(lru.len(), 1);
        assert_eq!(lru.evict_oldest(), Some("k".to_string()));
        assert_eq!(lru.evict_oldest(), None);
    }
}

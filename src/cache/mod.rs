//! Cache Module
//!
//! The cache store the listing service runs against: TTL expiry, LRU
//! eviction, keyspace hit/miss counters and an `INFO stats` reply. A Redis
//! server can stand in for it behind the same two traits.

mod backend;
mod entry;
mod lru;
mod remote;
mod stats;
mod store;


// Re-export public types
pub use backend::{CacheBackend, SharedCache, StatsSource};
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use remote::RedisCache;
pub use stats::StoreStats;
pub use store::CacheStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes, the same ceiling Redis puts on a
/// string value.
///
/// The whole listing is cached as one value. A listing that serializes past
/// the store's limit fails the collection write, and with it every list
/// request. `CacheStore::with_max_value_size` lowers it per store.
pub const MAX_VALUE_SIZE: usize = 512 * 1024 * 1024; // 512 MB

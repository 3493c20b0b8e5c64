//! Listings Module
//!
//! Cache-consistency rules for the property listing: when the cached
//! collection is read, populated and dropped, and how hit/miss metrics are
//! derived from the cache server.

mod metrics;
mod policy;

pub use metrics::{compute_cache_metrics, parse_info, MetricsSnapshot};
pub use policy::{PropertyCache, ALL_PROPERTIES_KEY, ALL_PROPERTIES_TTL};

//! Cache-aside policy for the full property listing.
//!
//! The whole listing lives under one well-known key. Reads populate it on a
//! miss; every property write deletes it. There is no versioning, so a read
//! that started before a write can still repopulate the key with the older
//! rows after the write's invalidation ran. That window stays open until the
//! next write or TTL expiry.

use std::sync::Arc;

use tracing::info;

use crate::cache::CacheBackend;
use crate::db::PropertyRepository;
use crate::error::Result;
use crate::events::PropertyEvent;
use crate::models::Property;

/// Cache key holding the serialized listing
pub const ALL_PROPERTIES_KEY: &str = "all_properties";

/// Lifetime of a populated listing, in seconds
pub const ALL_PROPERTIES_TTL: u64 = 3600;

/// Reads and invalidates the cached listing.
pub struct PropertyCache {
    cache: Arc<dyn CacheBackend>,
    repo: Arc<dyn PropertyRepository>,
}

impl PropertyCache {
    pub fn new(cache: Arc<dyn CacheBackend>, repo: Arc<dyn PropertyRepository>) -> Self {
        Self { cache, repo }
    }

    /// Returns every property, from the cache when present.
    ///
    /// On a miss the repository is read once and the result stored for
    /// [`ALL_PROPERTIES_TTL`] seconds before being returned. Repository and
    /// cache failures are returned as-is.
    pub async fn all_properties(&self) -> Result<Vec<Property>> {
        if let Some(raw) = self.cache.get(ALL_PROPERTIES_KEY).await? {
            let properties: Vec<Property> = serde_json::from_str(&raw)?;
            info!("Cache hit: loaded {} properties from cache", properties.len());
            return Ok(properties);
        }

        let properties = self.repo.all().await?;
        let encoded = serde_json::to_string(&properties)?;
        self.cache
            .set(ALL_PROPERTIES_KEY, encoded, ALL_PROPERTIES_TTL)
            .await?;
        info!(
            "Cache miss: loaded {} properties from database",
            properties.len()
        );
        Ok(properties)
    }

    /// Drops the cached listing after `property` was written.
    ///
    /// Deleting an absent key is not an error.
    pub async fn invalidate(&self, property: &Property, event: PropertyEvent) -> Result<()> {
        let existed = self.cache.delete(ALL_PROPERTIES_KEY).await?;
        info!(
            existed,
            "Cache invalidated: property '{}' was {}", property.title, event
        );
        Ok(())
    }
}

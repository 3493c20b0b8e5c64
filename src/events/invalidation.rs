//! Listener that drops the cached listing on every property write.

use std::sync::Arc;

use async_trait::async_trait;

use super::{PropertyEvent, PropertyListener};
use crate::error::Result;
use crate::listings::PropertyCache;
use crate::models::Property;

pub struct CacheInvalidator {
    cache: Arc<PropertyCache>,
}

impl CacheInvalidator {
    pub fn new(cache: Arc<PropertyCache>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl PropertyListener for CacheInvalidator {
    async fn on_property_event(&self, event: PropertyEvent, property: &Property) -> Result<()> {
        self.cache.invalidate(property, event).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheStore, SharedCache};
    use crate::db::InMemoryPropertyRepository;
    use crate::events::PropertyService;
    use crate::models::{NewProperty, Price};

    struct Harness {
        repo: Arc<InMemoryPropertyRepository>,
        listing: Arc<PropertyCache>,
        service: PropertyService,
    }

    fn harness() -> Harness {
        let cache = Arc::new(SharedCache::new(CacheStore::new(100, 300)));
        let repo = Arc::new(InMemoryPropertyRepository::new());
        let listing = Arc::new(PropertyCache::new(cache, repo.clone()));
        let service = PropertyService::new(repo.clone())
            .subscribe(Arc::new(CacheInvalidator::new(listing.clone())));
        Harness {
            repo,
            listing,
            service,
        }
    }

    fn new_property(title: &str) -> NewProperty {
        NewProperty {
            title: title.to_string(),
            description: "sea view".to_string(),
            price: Price::from_cents(150_000),
            location: "Mombasa".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_invalidates_listing() {
        let h = harness();
        assert!(h.listing.all_properties().await.unwrap().is_empty());

        h.service.create(new_property("new")).await.unwrap();
        let after = h.listing.all_properties().await.unwrap();

        assert_eq!(after.len(), 1);
        assert_eq!(h.repo.full_reads(), 2);
    }

    #[tokio::test]
    async fn test_update_invalidates_listing() {
        let h = harness();
        let created = h.service.create(new_property("before")).await.unwrap();
        h.listing.all_properties().await.unwrap();
        h.listing.all_properties().await.unwrap();
        assert_eq!(h.repo.full_reads(), 1);

        h.service
            .update(created.id, new_property("after"))
            .await
            .unwrap();
        let after = h.listing.all_properties().await.unwrap();

        assert_eq!(after[0].title, "after");
        assert_eq!(h.repo.full_reads(), 2);
    }

    #[tokio::test]
    async fn test_delete_invalidates_listing() {
        let h = harness();
        let created = h.service.create(new_property("doomed")).await.unwrap();
        h.listing.all_properties().await.unwrap();

        h.service.delete(created.id).await.unwrap();
        let after = h.listing.all_properties().await.unwrap();

        assert!(after.is_empty());
        assert_eq!(h.repo.full_reads(), 2);
    }
}

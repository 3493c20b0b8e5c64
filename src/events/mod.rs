//! Events Module
//!
//! The property write path and the listeners it notifies after each write.
//!
//! Writes go through [`PropertyService`], which calls every registered
//! [`PropertyListener`] before returning. A listener failure is returned to
//! the writer; the row change itself is not rolled back.

mod invalidation;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::db::PropertyRepository;
use crate::error::Result;
use crate::models::{NewProperty, Property};

pub use invalidation::CacheInvalidator;

/// What happened to a property row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyEvent {
    /// Created or updated
    Saved,
    Deleted,
}

impl fmt::Display for PropertyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyEvent::Saved => f.write_str("saved"),
            PropertyEvent::Deleted => f.write_str("deleted"),
        }
    }
}

/// Reacts to committed property writes.
#[async_trait]
pub trait PropertyListener: Send + Sync {
    async fn on_property_event(&self, event: PropertyEvent, property: &Property) -> Result<()>;
}

// == Property Service ==
/// Write path for property rows.
pub struct PropertyService {
    repo: Arc<dyn PropertyRepository>,
    listeners: Vec<Arc<dyn PropertyListener>>,
}

impl PropertyService {
    pub fn new(repo: Arc<dyn PropertyRepository>) -> Self {
        Self {
            repo,
            listeners: Vec::new(),
        }
    }

    /// Registers a listener; listeners run in registration order.
    pub fn subscribe(mut self, listener: Arc<dyn PropertyListener>) -> Self {
        self.listeners.push(listener);
        self
    }

    pub async fn create(&self, new: NewProperty) -> Result<Property> {
        let property = self.repo.insert(new).await?;
        self.notify(PropertyEvent::Saved, &property).await?;
        Ok(property)
    }

    pub async fn update(&self, id: u64, changes: NewProperty) -> Result<Property> {
        let property = self.repo.update(id, changes).await?;
        self.notify(PropertyEvent::Saved, &property).await?;
        Ok(property)
    }

    pub async fn delete(&self, id: u64) -> Result<Property> {
        let property = self.repo.remove(id).await?;
        self.notify(PropertyEvent::Deleted, &property).await?;
        Ok(property)
    }

    async fn notify(&self, event: PropertyEvent, property: &Property) -> Result<()> {
        debug!(
            id = property.id,
            %event,
            listeners = self.listeners.len(),
            "Dispatching property event"
        );
        for listener in &self.listeners {
            listener.on_property_event(event, property).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryPropertyRepository;
    use crate::error::AppError;
    use crate::models::Price;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<(PropertyEvent, u64)>>,
    }

    #[async_trait]
    impl PropertyListener for Recorder {
        async fn on_property_event(&self, event: PropertyEvent, property: &Property) -> Result<()> {
            self.seen.lock().await.push((event, property.id));
            Ok(())
        }
    }

    struct Failing;

    #[async_trait]
    impl PropertyListener for Failing {
        async fn on_property_event(&self, _event: PropertyEvent, _property: &Property) -> Result<()> {
            Err(AppError::Cache("cache unreachable".to_string()))
        }
    }

    fn new_property() -> NewProperty {
        NewProperty {
            title: "Cottage".to_string(),
            description: String::new(),
            price: Price::from_cents(99_900),
            location: "Kumasi".to_string(),
        }
    }

    #[tokio::test]
    async fn test_every_write_notifies_listener() {
        let recorder = Arc::new(Recorder::default());
        let service = PropertyService::new(Arc::new(InMemoryPropertyRepository::new()))
            .subscribe(recorder.clone());

        let created = service.create(new_property()).await.unwrap();
        service.update(created.id, new_property()).await.unwrap();
        service.delete(created.id).await.unwrap();

        let seen = recorder.seen.lock().await.clone();
        assert_eq!(
            seen,
            vec![
                (PropertyEvent::Saved, created.id),
                (PropertyEvent::Saved, created.id),
                (PropertyEvent::Deleted, created.id),
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_write_notifies_nobody() {
        let recorder = Arc::new(Recorder::default());
        let service = PropertyService::new(Arc::new(InMemoryPropertyRepository::new()))
            .subscribe(recorder.clone());

        assert!(service.delete(404).await.is_err());
        assert!(recorder.seen.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_listener_error_reaches_writer() {
        let repo = Arc::new(InMemoryPropertyRepository::new());
        let service = PropertyService::new(repo.clone()).subscribe(Arc::new(Failing));

        let result = service.create(new_property()).await;

        assert!(matches!(result, Err(AppError::Cache(_))));
        assert_eq!(repo.all().await.unwrap().len(), 1);
    }

    #[test]
    fn test_event_display() {
        assert_eq!(PropertyEvent::Saved.to_string(), "saved");
        assert_eq!(PropertyEvent::Deleted.to_string(), "deleted");
    }
}

//! Persistence Module
//!
//! The system of record for property rows.

mod memory;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{NewProperty, Property};

pub use memory::InMemoryPropertyRepository;

/// Storage operations on property rows.
///
/// `all` returns rows in the store's natural order, ascending by id.
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// Reads every row.
    async fn all(&self) -> Result<Vec<Property>>;

    /// Inserts a new row, assigning its id and creation time.
    async fn insert(&self, new: NewProperty) -> Result<Property>;

    /// Replaces the editable fields of row `id`. Fails with `NotFound`.
    async fn update(&self, id: u64, changes: NewProperty) -> Result<Property>;

    /// Removes row `id` and returns it. Fails with `NotFound`.
    async fn remove(&self, id: u64) -> Result<Property>;
}

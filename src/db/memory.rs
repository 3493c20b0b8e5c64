//! In-memory property table.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use super::PropertyRepository;
use crate::error::{AppError, Result};
use crate::models::{NewProperty, Property};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<u64, Property>,
    next_id: u64,
}

/// Property table held in process memory, keyed and ordered by id.
///
/// Counts full-table reads so callers can tell whether a read reached the
/// store at all.
#[derive(Debug, Default)]
pub struct InMemoryPropertyRepository {
    table: RwLock<Table>,
    full_reads: AtomicUsize,
}

impl InMemoryPropertyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a repository holding `rows` as-is. Later inserts get ids above
    /// the highest seeded id.
    pub fn with_rows(rows: impl IntoIterator<Item = Property>) -> Self {
        let rows: BTreeMap<u64, Property> = rows.into_iter().map(|p| (p.id, p)).collect();
        let next_id = rows.keys().next_back().copied().unwrap_or(0);
        Self {
            table: RwLock::new(Table { rows, next_id }),
            full_reads: AtomicUsize::new(0),
        }
    }

    /// Number of times `all` has been served.
    pub fn full_reads(&self) -> usize {
        self.full_reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PropertyRepository for InMemoryPropertyRepository {
    async fn all(&self) -> Result<Vec<Property>> {
        self.full_reads.fetch_add(1, Ordering::SeqCst);
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn insert(&self, new: NewProperty) -> Result<Property> {
        let mut table = self.table.write().await;
        table.next_id += 1;
        let property = Property {
            id: table.next_id,
            title: new.title,
            description: new.description,
            price: new.price,
            location: new.location,
            // Rows carry microsecond timestamps, like the column they stand in for.
            created_at: Utc::now().trunc_subsecs(6),
        };
        table.rows.insert(property.id, property.clone());
        debug!(id = property.id, "Inserted property row");
        Ok(property)
    }

    async fn update(&self, id: u64, changes: NewProperty) -> Result<Property> {
        let mut table = self.table.write().await;
        let row = table
            .rows
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("property {}", id)))?;

        row.title = changes.title;
        row.description = changes.description;
        row.price = changes.price;
        row.location = changes.location;
        debug!(id, "Updated property row");
        Ok(row.clone())
    }

    async fn remove(&self, id: u64) -> Result<Property> {
        let mut table = self.table.write().await;
        let removed = table
            .rows
            .remove(&id)
            .ok_or_else(|| AppError::NotFound(format!("property {}", id)))?;
        debug!(id, "Removed property row");
        Ok(removed)
    }
}

//! Listing Cache - property listing service with a cached collection
//!
//! Serves the full property listing from a cache-aside key that every write
//! invalidates, and reports the cache server's hit/miss counters.

pub mod api;
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod events;
pub mod listings;
pub mod models;
pub mod tasks;

pub use api::{create_router, AppState};
pub use config::Config;
pub use error::{AppError, Result};
pub use tasks::spawn_cleanup_task;

//! API Module
//!
//! HTTP handlers and routing for the listing service REST API.
//!
//! # Endpoints
//! - `GET /properties` - List every property
//! - `POST /properties` - Create a property
//! - `PUT /properties/:id` - Replace a property
//! - `DELETE /properties/:id` - Delete a property
//! - `GET /cache-metrics` - Cache hit/miss metrics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod response_cache;
pub mod routes;

pub use handlers::*;
pub use response_cache::{page_cache_key, RESPONSE_CACHE_TTL};
pub use routes::create_router;

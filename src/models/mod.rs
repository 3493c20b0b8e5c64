//! Domain records and HTTP DTOs
//!
//! `property` holds the persisted record and its write payload; `responses`
//! holds the JSON shapes the API returns.

pub mod property;
pub mod responses;

// Re-export commonly used types
pub use property::{NewProperty, ParsePriceError, Price, Property};
pub use responses::{HealthResponse, PropertyJson, PropertyListResponse};

//! Response DTOs for the listing API
//!
//! Defines the structure of outgoing HTTP response bodies.

use chrono::{DateTime, SecondsFormat, SubsecRound, Timelike, Utc};
use serde::Serialize;

use super::Property;

/// One property as rendered by the API.
///
/// `price` is the two-place decimal string and `created_at` an ISO-8601
/// timestamp with an explicit `+00:00` offset and at most six fractional
/// digits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyJson {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub price: String,
    pub location: String,
    pub created_at: String,
}

impl From<&Property> for PropertyJson {
    fn from(property: &Property) -> Self {
        Self {
            id: property.id,
            title: property.title.clone(),
            description: property.description.clone(),
            price: property.price.to_string(),
            location: property.location.clone(),
            created_at: iso_timestamp(&property.created_at),
        }
    }
}

/// Whole seconds when there is no sub-second part, otherwise exactly six
/// fractional digits.
fn iso_timestamp(ts: &DateTime<Utc>) -> String {
    let ts = ts.trunc_subsecs(6);
    let format = if ts.nanosecond() == 0 {
        SecondsFormat::Secs
    } else {
        SecondsFormat::Micros
    };
    ts.to_rfc3339_opts(format, false)
}

/// Response body for the list endpoint (GET /properties)
#[derive(Debug, Clone, Serialize)]
pub struct PropertyListResponse {
    pub properties: Vec<PropertyJson>,
}

impl PropertyListResponse {
    pub fn new(properties: &[Property]) -> Self {
        Self {
            properties: properties.iter().map(PropertyJson::from).collect(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

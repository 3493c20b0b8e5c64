//! Property record and its write payload.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Maximum title and location length in characters
pub const MAX_TEXT_FIELD: usize = 200;

// == Price ==
/// Non-negative amount with exactly two decimal places, held in minor units.
///
/// Serializes as a string (`"100.50"`) so no precision is lost in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Price {
    cents: u64,
}

impl Price {
    pub fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    pub fn cents(&self) -> u64 {
        self.cents
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.cents / 100, self.cents % 100)
    }
}

/// Error for a price string that is not a non-negative two-place decimal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePriceError(String);

impl fmt::Display for ParsePriceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid price '{}'", self.0)
    }
}

impl std::error::Error for ParsePriceError {}

impl FromStr for Price {
    type Err = ParsePriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePriceError(s.to_string());
        let (whole, frac) = s.trim().split_once('.').unwrap_or((s.trim(), ""));

        if whole.is_empty() || frac.len() > 2 {
            return Err(err());
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }

        let whole: u64 = whole.parse().map_err(|_| err())?;
        let frac: u64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<u64>().map_err(|_| err())? * 10,
            _ => frac.parse().map_err(|_| err())?,
        };

        whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac))
            .map(Price::from_cents)
            .ok_or_else(err)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PriceVisitor;

        impl de::Visitor<'_> for PriceVisitor {
            type Value = Price;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a non-negative decimal with at most two places")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Price, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Price, E> {
                v.checked_mul(100)
                    .map(Price::from_cents)
                    .ok_or_else(|| E::custom("price out of range"))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Price, E> {
                u64::try_from(v)
                    .map_err(|_| E::custom("price must not be negative"))
                    .and_then(|v| self.visit_u64(v))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Price, E> {
                if !v.is_finite() {
                    return Err(E::custom("price must be finite"));
                }
                self.visit_str(&v.to_string())
            }
        }

        deserializer.deserialize_any(PriceVisitor)
    }
}

// == Property ==
/// A listing row as held by the persistence store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub price: Price,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

// == New Property ==
/// Request body for creating or replacing a property.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProperty {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    pub location: String,
}

impl NewProperty {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.title.trim().is_empty() {
            return Some("Title cannot be empty".to_string());
        }
        if self.title.chars().count() > MAX_TEXT_FIELD {
            return Some(format!(
                "Title exceeds maximum length of {} characters",
                MAX_TEXT_FIELD
            ));
        }
        if self.location.chars().count() > MAX_TEXT_FIELD {
            return Some(format!(
                "Location exceeds maximum length of {} characters",
                MAX_TEXT_FIELD
            ));
        }
        None
    }
}

//! Hit/miss metrics derived from the cache server's `INFO stats` counters.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{error, info};

use crate::cache::StatsSource;
use crate::error::{AppError, Result};

/// Point-in-time view of the cache server's cumulative lookup counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub keyspace_hits: u64,
    pub keyspace_misses: u64,
    pub total_requests: u64,
    /// Hits as a percentage of all lookups, two decimals, 0 with no lookups
    pub hit_ratio: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MetricsSnapshot {
    pub fn from_counts(keyspace_hits: u64, keyspace_misses: u64) -> Self {
        let total_requests = keyspace_hits.saturating_add(keyspace_misses);
        let hit_ratio = if total_requests == 0 {
            0.0
        } else {
            round2(keyspace_hits as f64 / total_requests as f64 * 100.0)
        };

        Self {
            keyspace_hits,
            keyspace_misses,
            total_requests,
            hit_ratio,
            error: None,
        }
    }

    /// Zeroed snapshot carrying the reason the counters could not be read.
    pub fn failed(reason: impl ToString) -> Self {
        Self {
            error: Some(reason.to_string()),
            ..Self::from_counts(0, 0)
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Reads the cache server's counters and derives a snapshot.
///
/// Never fails: any error talking to the server or reading its reply is
/// logged and reported through the snapshot's `error` field instead.
pub async fn compute_cache_metrics(source: &dyn StatsSource) -> MetricsSnapshot {
    match read_counters(source).await {
        Ok((hits, misses)) => {
            let snapshot = MetricsSnapshot::from_counts(hits, misses);
            info!(
                "Cache metrics - hits: {}, misses: {}, hit ratio: {:.2}%",
                snapshot.keyspace_hits, snapshot.keyspace_misses, snapshot.hit_ratio
            );
            snapshot
        }
        Err(err) => {
            error!("Error retrieving cache metrics: {}", err);
            MetricsSnapshot::failed(err)
        }
    }
}

async fn read_counters(source: &dyn StatsSource) -> Result<(u64, u64)> {
    let reply = source.info("stats").await?;
    let fields = parse_info(&reply);
    Ok((
        counter(&fields, "keyspace_hits")?,
        counter(&fields, "keyspace_misses")?,
    ))
}

/// Splits an `INFO` reply into its `name:value` fields.
///
/// Section headers (`# Stats`), blank lines and lines without a colon are
/// skipped.
pub fn parse_info(reply: &str) -> HashMap<&str, &str> {
    reply
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.trim(), value.trim()))
        .collect()
}

/// Absent counters read as zero; present ones must be non-negative integers.
fn counter(fields: &HashMap<&str, &str>, name: &str) -> Result<u64> {
    match fields.get(name) {
        None => Ok(0),
        Some(raw) => raw.parse().map_err(|_| {
            AppError::Cache(format!("invalid value for {}: '{}'", name, raw))
        }),
    }
}

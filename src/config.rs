//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::cache::MAX_VALUE_SIZE;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
/// The collection and response-cache TTLs are fixed constants and deliberately
/// not part of this struct.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache store can hold
    pub max_entries: usize,
    /// Default TTL in seconds for cache writes that carry no explicit TTL
    pub default_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Whether the list handler also logs a metrics snapshot on every render
    pub log_metrics_on_list: bool,
    /// Largest value the in-process store accepts, in bytes
    pub max_value_size: usize,
    /// Redis server to use as the cache store; the in-process store when unset
    pub redis_url: Option<String>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 300)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 1)
    /// - `LOG_METRICS_ON_LIST` - Log cache metrics on each list render (default: true)
    /// - `MAX_VALUE_SIZE` - Largest cached value in bytes (default: 512 MB)
    /// - `REDIS_URL` - e.g. `redis://127.0.0.1:6379/0` (default: unset, in-process store)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_entries: env_or("MAX_ENTRIES", defaults.max_entries),
            default_ttl: env_or("DEFAULT_TTL", defaults.default_ttl),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
            log_metrics_on_list: env_or("LOG_METRICS_ON_LIST", defaults.log_metrics_on_list),
            max_value_size: env_or("MAX_VALUE_SIZE", defaults.max_value_size),
            redis_url: env_url("REDIS_URL"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            default_ttl: 300,
            server_port: 3000,
            cleanup_interval: 1,
            log_metrics_on_list: true,
            max_value_size: MAX_VALUE_SIZE,
            redis_url: None,
        }
    }
}

/// Reads and parses an environment variable, falling back on absence or parse failure.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Reads a connection URL; blank values count as unset.
fn env_url(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_entries, 1000);
        assert_eq!(config.default_ttl, 300);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cleanup_interval, 1);
        assert!(config.log_metrics_on_list);
        assert_eq!(config.max_value_size, MAX_VALUE_SIZE);
        assert!(config.redis_url.is_none());
    }

    #[test]
    fn test_env_url_reads_and_trims() {
        env::set_var("LISTING_CACHE_TEST_URL", " redis://cache:6379/1 ");
        assert_eq!(
            env_url("LISTING_CACHE_TEST_URL").as_deref(),
            Some("redis://cache:6379/1")
        );
        env::remove_var("LISTING_CACHE_TEST_URL");
    }

    #[test]
    fn test_env_url_blank_is_unset() {
        env::set_var("LISTING_CACHE_TEST_BLANK_URL", "   ");
        assert!(env_url("LISTING_CACHE_TEST_BLANK_URL").is_none());
        env::remove_var("LISTING_CACHE_TEST_BLANK_URL");
        assert!(env_url("LISTING_CACHE_TEST_BLANK_URL").is_none());
    }

    #[test]
    fn test_env_or_falls_back_on_garbage() {
        env::set_var("LISTING_CACHE_TEST_PORT", "not-a-port");
        assert_eq!(env_or("LISTING_CACHE_TEST_PORT", 8080u16), 8080);
        env::remove_var("LISTING_CACHE_TEST_PORT");
    }

    #[test]
    fn test_env_or_parses_bool() {
        env::set_var("LISTING_CACHE_TEST_FLAG", "false");
        assert!(!env_or("LISTING_CACHE_TEST_FLAG", true));
        env::remove_var("LISTING_CACHE_TEST_FLAG");
    }

    #[test]
    fn test_env_or_missing_uses_default() {
        env::remove_var("LISTING_CACHE_TEST_MISSING");
        assert_eq!(env_or("LISTING_CACHE_TEST_MISSING", 42usize), 42);
    }
}

//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::api::response_cache::RESPONSE_TTL_SECS;
use crate::cache::LISTING_TTL_SECS;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// TTL in seconds of the cached property listing
    pub listing_cache_ttl: u64,
    /// TTL in seconds of the memoized listing response, 0 disables it
    pub response_cache_ttl: u64,
    /// Propagate cache backend read failures instead of falling back to the store
    pub cache_fail_closed: bool,
    /// Background expiry sweep interval in seconds
    pub cleanup_interval: u64,
    /// Maximum number of entries the in-process backend holds
    pub max_entries: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `LISTING_CACHE_TTL` - Listing cache TTL in seconds (default: 3600)
    /// - `RESPONSE_CACHE_TTL` - Response cache TTL in seconds (default: 900)
    /// - `CACHE_FAIL_CLOSED` - `true` to fail closed on backend errors (default: false)
    /// - `CLEANUP_INTERVAL` - Expiry sweep frequency in seconds (default: 1)
    /// - `MAX_ENTRIES` - In-process backend capacity (default: 1000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            listing_cache_ttl: env_or("LISTING_CACHE_TTL", defaults.listing_cache_ttl),
            response_cache_ttl: env_or("RESPONSE_CACHE_TTL", defaults.response_cache_ttl),
            cache_fail_closed: env_or("CACHE_FAIL_CLOSED", defaults.cache_fail_closed),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
            max_entries: env_or("MAX_ENTRIES", defaults.max_entries),
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            listing_cache_ttl: LISTING_TTL_SECS,
            response_cache_ttl: RESPONSE_TTL_SECS,
            cache_fail_closed: false,
            cleanup_interval: 1,
            max_entries: 1000,
        }
    }
}

//! Cache Backend Module
//!
//! The key-value interface the listing cache and metrics reporter consume.
//! Implementations may be in-process (`MemoryBackend`) or a client for a
//! shared external server; callers receive them as `Arc<dyn CacheBackend>`.

use async_trait::async_trait;

use crate::cache::CacheStats;
use crate::error::Result;

/// A shared key-value store with per-entry TTL and keyspace counters.
///
/// Every method may fail with `CacheError::Backend` when the backend cannot
/// be reached.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Returns the live value under `key`, or `None` when absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value and deadline.
    async fn set(&self, key: &str, value: String, ttl_seconds: u64) -> Result<()>;

    /// Removes `key`. Returns whether an entry was present; absence is not an error.
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Cumulative keyspace hit and miss counters.
    async fn stats(&self) -> Result<CacheStats>;
}

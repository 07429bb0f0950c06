//! In-process Cache Backend
//!
//! HashMap storage with TTL expiration and keyspace counters, shared behind a
//! `tokio::sync::RwLock`.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{CacheBackend, CacheEntry, CacheStats, Clock, SystemClock};
use crate::error::{CacheError, Result};

/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

// == Keyspace ==
/// The unsynchronized state guarded by `MemoryBackend`.
#[derive(Debug, Default)]
struct Keyspace {
    entries: HashMap<String, CacheEntry>,
    stats: CacheStats,
}

impl Keyspace {
    fn get(&mut self, key: &str, now_ms: u64) -> Option<String> {
        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired(now_ms) => {
                let value = entry.value.clone();
                self.stats.record_hit();
                return Some(value);
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.entries.remove(key);
        }
        self.stats.record_miss();
        None
    }

    fn set(&mut self, key: &str, entry: CacheEntry, max_entries: usize, now_ms: u64) {
        let full = !self.entries.contains_key(key) && self.entries.len() >= max_entries;
        if full && self.purge_expired(now_ms) == 0 {
            self.evict_soonest_expiring();
        }
        self.entries.insert(key.to_string(), entry);
    }

    fn purge_expired(&mut self, now_ms: u64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now_ms));
        before - self.entries.len()
    }

    fn evict_soonest_expiring(&mut self) {
        let victim = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.expires_at.unwrap_or(u64::MAX))
            .map(|(key, _)| key.clone());

        if let Some(key) = victim {
            debug!("Backend at capacity, evicting '{}'", key);
            self.entries.remove(&key);
        }
    }
}

// == Memory Backend ==
/// Cache backend living inside the service process.
#[derive(Debug)]
pub struct MemoryBackend {
    keyspace: RwLock<Keyspace>,
    clock: Arc<dyn Clock>,
    max_entries: usize,
}

impl MemoryBackend {
    // == Constructor ==
    /// Creates a backend holding at most `max_entries` keys, on wall-clock time.
    pub fn new(max_entries: usize) -> Self {
        Self::with_clock(max_entries, Arc::new(SystemClock))
    }

    /// Creates a backend reading time from `clock`.
    pub fn with_clock(max_entries: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            keyspace: RwLock::new(Keyspace::default()),
            clock,
            max_entries: max_entries.max(1),
        }
    }

    // == Contains Key ==
    /// Reports whether a live entry exists without touching the counters.
    pub async fn contains_key(&self, key: &str) -> bool {
        let now = self.clock.now_ms();
        self.keyspace
            .read()
            .await
            .entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired(now))
    }

    // == Cleanup Expired ==
    /// Removes all expired entries, returning how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = self.clock.now_ms();
        self.keyspace.write().await.purge_expired(now)
    }

    // == Length ==
    /// Returns the number of stored entries, including expired ones not yet purged.
    pub async fn len(&self) -> usize {
        self.keyspace.read().await.entries.len()
    }

    // == Is Empty ==
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let now = self.clock.now_ms();
        Ok(self.keyspace.write().await.get(key, now))
    }

    async fn set(&self, key: &str, value: String, ttl_seconds: u64) -> Result<()> {
        if key.is_empty() || key.len() > MAX_KEY_LENGTH {
            return Err(CacheError::InvalidRequest(format!(
                "Key must be 1 to {} bytes",
                MAX_KEY_LENGTH
            )));
        }

        let now = self.clock.now_ms();
        let entry = CacheEntry::new(value, Some(ttl_seconds), now);
        self.keyspace
            .write()
            .await
            .set(key, entry, self.max_entries, now);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.keyspace.write().await.entries.remove(key).is_some())
    }

    async fn stats(&self) -> Result<CacheStats> {
        let keyspace = self.keyspace.read().await;
        let mut stats = keyspace.stats;
        stats.set_total_entries(keyspace.entries.len());
        Ok(stats)
    }
}

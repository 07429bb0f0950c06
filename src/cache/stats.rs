//! Cache Statistics Module
//!
//! Cumulative keyspace counters reported by a cache backend.

use serde::Serialize;

// == Cache Stats ==
/// Keyspace counters of a cache backend.
///
/// `hits` and `misses` only ever grow for the lifetime of the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Lookups that found a live entry
    pub hits: u64,
    /// Lookups that found nothing or an expired entry
    pub misses: u64,
    /// Current number of entries in the backend
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters as reported by an external backend that tracks no entry count.
    pub fn from_counters(hits: u64, misses: u64) -> Self {
        Self {
            hits,
            misses,
            total_entries: 0,
        }
    }

    // == Total Requests ==
    /// Returns hits + misses.
    pub fn total_requests(&self) -> u64 {
        self.hits.saturating_add(self.misses)
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Update Entry Count ==
    /// Updates the total entries count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}

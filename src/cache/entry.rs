//! Cache Entry Module
//!
//! Defines the structure for individual backend entries with TTL support.

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value, already serialized by the caller
    pub value: String,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    pub expires_at: Option<u64>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry written at `now_ms` with optional TTL.
    pub fn new(value: String, ttl_seconds: Option<u64>, now_ms: u64) -> Self {
        let expires_at = ttl_seconds.map(|ttl| now_ms.saturating_add(ttl.saturating_mul(1000)));

        Self {
            value,
            expires_at,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now_ms`.
    ///
    /// An entry is expired once the current time is greater than or equal to
    /// its deadline, so an entry written at T with a TTL of N seconds is gone
    /// for every read at T + N seconds or later.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        match self.expires_at {
            Some(expires) => now_ms >= expires,
            None => false,
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const T0: u64 = 1_700_000_000_000;

    #[test]
    fn test_entry_creation_no_ttl() {
        let entry = CacheEntry::new("test_value".to_string(), None, T0);

        assert_eq!(entry.value, "test_value");
        assert!(entry.expires_at.is_none());
        assert!(!entry.is_expired(u64::MAX));
    }

    #[test]
    fn test_entry_creation_with_ttl() {
        let entry = CacheEntry::new("test_value".to_string(), Some(3600), T0);

        assert_eq!(entry.expires_at, Some(T0 + 3_600_000));
        assert!(!entry.is_expired(T0));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let entry = CacheEntry::new("test".to_string(), Some(3600), T0);

        assert!(!entry.is_expired(T0 + 3_599_999));
        assert!(entry.is_expired(T0 + 3_600_000), "Entry should be expired at boundary");
    }
}

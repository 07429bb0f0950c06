//! Cache Manager
//!
//! Read-through caching of the full property listing. A hit returns the cached
//! snapshot; a miss reads the store, projects each record and writes the
//! result back under `ALL_PROPERTIES_KEY`.
//!
//! The check-then-set sequence takes no lock. Concurrent misses may each read
//! the store and write the cache; the last write wins and every writer stores
//! a projection of the same source of truth.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cache::CacheBackend;
use crate::error::Result;
use crate::models::PropertySummary;
use crate::store::PropertyStore;

/// Backend key holding the projected listing.
pub const ALL_PROPERTIES_KEY: &str = "all_properties";

/// Default lifetime of the cached listing in seconds.
pub const LISTING_TTL_SECS: u64 = 3600;

// == Cache Manager ==
#[derive(Clone)]
pub struct CacheManager {
    backend: Arc<dyn CacheBackend>,
    store: Arc<dyn PropertyStore>,
    ttl_seconds: u64,
    fail_closed: bool,
}

impl CacheManager {
    // == Constructor ==
    /// Creates a fail-open manager caching the listing for `LISTING_TTL_SECS`.
    pub fn new(backend: Arc<dyn CacheBackend>, store: Arc<dyn PropertyStore>) -> Self {
        Self {
            backend,
            store,
            ttl_seconds: LISTING_TTL_SECS,
            fail_closed: false,
        }
    }

    /// Overrides the listing TTL.
    pub fn with_ttl(mut self, ttl_seconds: u64) -> Self {
        self.ttl_seconds = ttl_seconds;
        self
    }

    /// When set, backend failures are returned to the caller instead of
    /// being served from the store.
    pub fn with_fail_closed(mut self, fail_closed: bool) -> Self {
        self.fail_closed = fail_closed;
        self
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    // == Get All Properties ==
    /// Returns the projected listing, from the cache when present.
    ///
    /// Store failures always propagate. Backend failures propagate only when
    /// the manager is fail-closed; otherwise the call degrades to a store read.
    pub async fn get_all_properties(&self) -> Result<Vec<PropertySummary>> {
        match self.read_cached().await {
            Ok(Some(properties)) => {
                debug!(
                    "Cache HIT: {} properties from '{}'",
                    properties.len(),
                    ALL_PROPERTIES_KEY
                );
                return Ok(properties);
            }
            Ok(None) => info!("Cache MISS: fetching properties from the store"),
            Err(err) if err.is_backend() && !self.fail_closed => {
                warn!("Cache read failed, falling back to the store: {}", err)
            }
            Err(err) => return Err(err),
        }

        let properties: Vec<PropertySummary> = self
            .store
            .list_all()
            .await?
            .iter()
            .map(PropertySummary::from)
            .collect();

        let payload = serde_json::to_string(&properties)?;
        match self
            .backend
            .set(ALL_PROPERTIES_KEY, payload, self.ttl_seconds)
            .await
        {
            Ok(()) => info!(
                "Cached {} properties for {}s",
                properties.len(),
                self.ttl_seconds
            ),
            Err(err) if err.is_backend() && !self.fail_closed => {
                warn!("Cache write failed, serving uncached listing: {}", err)
            }
            Err(err) => return Err(err),
        }

        Ok(properties)
    }

    /// Fetches and decodes the cached listing. An undecodable payload reads as
    /// a miss so the next repopulation overwrites it.
    async fn read_cached(&self) -> Result<Option<Vec<PropertySummary>>> {
        let Some(raw) = self.backend.get(ALL_PROPERTIES_KEY).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(properties) => Ok(Some(properties)),
            Err(err) => {
                warn!("Discarding undecodable '{}' entry: {}", ALL_PROPERTIES_KEY, err);
                Ok(None)
            }
        }
    }

    // == Invalidate ==
    /// Deletes the cached listing. Returns whether an entry was present.
    pub async fn invalidate(&self) -> Result<bool> {
        self.backend.delete(ALL_PROPERTIES_KEY).await
    }
}

//! Invalidation Trigger
//!
//! Subscribes to the record store's write path and deletes the cached listing
//! once per committed create, update or delete, before the write returns to
//! its caller. Which fields changed is irrelevant.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::cache::{CacheManager, ALL_PROPERTIES_KEY};
use crate::error::Result;
use crate::store::{MutationEvent, MutationListener, PropertyStore};

// == Cache Invalidator ==
pub struct CacheInvalidator {
    manager: CacheManager,
}

impl CacheInvalidator {
    pub fn new(manager: CacheManager) -> Self {
        Self { manager }
    }

    /// Creates an invalidator for `manager` and subscribes it to `store`.
    pub fn attach(manager: CacheManager, store: &dyn PropertyStore) -> Arc<Self> {
        let invalidator = Arc::new(Self::new(manager));
        store.subscribe(invalidator.clone());
        invalidator
    }
}

#[async_trait]
impl MutationListener for CacheInvalidator {
    async fn on_mutation(&self, event: &MutationEvent) -> Result<()> {
        let existed = self.manager.invalidate().await?;
        info!(
            "Property '{}' was {}. Cache '{}' invalidated (entry present: {})",
            event.record.title, event.kind, ALL_PROPERTIES_KEY, existed
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheBackend, CacheStats, MemoryBackend};
    use crate::error::CacheError;
    use crate::models::{NewProperty, Price, PropertyPatch};
    use crate::store::MemoryPropertyStore;

    /// Serves reads and writes but cannot delete.
    struct StuckBackend(MemoryBackend);

    #[async_trait]
    impl CacheBackend for StuckBackend {
        async fn get(&self, key: &str) -> Result<Option<String>> {
            self.0.get(key).await
        }
        async fn set(&self, key: &str, value: String, ttl_seconds: u64) -> Result<()> {
            self.0.set(key, value, ttl_seconds).await
        }
        async fn delete(&self, _key: &str) -> Result<bool> {
            Err(CacheError::Backend("delete timed out".to_string()))
        }
        async fn stats(&self) -> Result<CacheStats> {
            self.0.stats().await
        }
    }

    struct Fixture {
        backend: Arc<MemoryBackend>,
        store: Arc<MemoryPropertyStore>,
        manager: CacheManager,
    }

    fn fixture() -> Fixture {
        let backend = Arc::new(MemoryBackend::new(100));
        let store = Arc::new(MemoryPropertyStore::new());
        let manager = CacheManager::new(backend.clone(), store.clone());
        CacheInvalidator::attach(manager.clone(), store.as_ref());
        Fixture {
            backend,
            store,
            manager,
        }
    }

    fn villa() -> NewProperty {
        NewProperty {
            title: "Luxury Villa with Pool".to_string(),
            description: "Stunning villa with infinity pool".to_string(),
            price: "2500000.00".parse().unwrap(),
            location: "Santorini".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_invalidates() {
        let f = fixture();
        f.manager.get_all_properties().await.unwrap();
        assert!(f.backend.contains_key(ALL_PROPERTIES_KEY).await);

        f.store.create(villa()).await.unwrap();

        assert!(!f.backend.contains_key(ALL_PROPERTIES_KEY).await);
        assert_eq!(f.manager.get_all_properties().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_invalidates_regardless_of_field() {
        let f = fixture();
        let created = f.store.create(villa()).await.unwrap();

        for patch in [
            PropertyPatch {
                description: Some("Refurbished".to_string()),
                ..Default::default()
            },
            PropertyPatch::default(),
        ] {
            f.manager.get_all_properties().await.unwrap();
            f.store.update(created.id, patch).await.unwrap();
            assert!(!f.backend.contains_key(ALL_PROPERTIES_KEY).await);
        }
    }

    #[tokio::test]
    async fn test_delete_invalidates() {
        let f = fixture();
        let created = f.store.create(villa()).await.unwrap();
        f.manager.get_all_properties().await.unwrap();

        f.store.delete(created.id).await.unwrap();

        assert!(!f.backend.contains_key(ALL_PROPERTIES_KEY).await);
        assert!(f.manager.get_all_properties().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mutation_on_empty_cache_is_noop() {
        let f = fixture();

        f.store.create(villa()).await.unwrap();
        f.store.create(villa()).await.unwrap();

        assert!(!f.backend.contains_key(ALL_PROPERTIES_KEY).await);
        assert!(f.backend.is_empty().await);
    }

    #[tokio::test]
    async fn test_updated_price_visible_after_invalidation() {
        let f = fixture();
        let created = f.store.create(villa()).await.unwrap();
        f.manager.get_all_properties().await.unwrap();

        let patch = PropertyPatch {
            price: Some(Price::from_cents(275_000_000)),
            ..Default::default()
        };
        f.store.update(created.id, patch).await.unwrap();

        let listing = f.manager.get_all_properties().await.unwrap();
        assert_eq!(listing[0].price.to_string(), "2750000.00");
    }

    #[tokio::test]
    async fn test_failed_invalidation_is_reported_to_writer() {
        let store = Arc::new(MemoryPropertyStore::new());
        let backend = Arc::new(StuckBackend(MemoryBackend::new(100)));
        let manager = CacheManager::new(backend, store.clone());
        CacheInvalidator::attach(manager.clone(), store.as_ref());

        let created = store.create(villa()).await;
        assert!(matches!(created, Err(CacheError::Backend(_))));
        manager.get_all_properties().await.unwrap();

        let patch = PropertyPatch {
            price: Some(Price::from_cents(999)),
            ..Default::default()
        };
        let result = store.update(1, patch).await;

        match result {
            Err(CacheError::Backend(msg)) => assert!(msg.contains("invalidation failed")),
            other => panic!("Expected invalidation failure, got {:?}", other),
        }
        assert_eq!(store.get(1).await.unwrap().price, Price::from_cents(999));
    }
}

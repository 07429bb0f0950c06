//! In-process Record Store
//!
//! A `BTreeMap` of records behind a `tokio::sync::RwLock`, with an observer
//! list notified after each committed write.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock as StdRwLock};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, error};

use super::{MutationEvent, MutationKind, MutationListener, PropertyStore};
use crate::error::{CacheError, Result};
use crate::models::{NewProperty, Property, PropertyPatch};

#[derive(Debug, Default)]
struct Records {
    rows: BTreeMap<u64, Property>,
    next_id: u64,
}

// == Memory Property Store ==
#[derive(Default)]
pub struct MemoryPropertyStore {
    records: RwLock<Records>,
    listeners: StdRwLock<Vec<Arc<dyn MutationListener>>>,
}

impl MemoryPropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    // == Notify ==
    /// Delivers `event` to every listener in registration order.
    ///
    /// Every listener runs even if an earlier one fails; the first failure is
    /// returned so the write is not reported as complete.
    async fn notify(&self, event: MutationEvent) -> Result<()> {
        let listeners: Vec<Arc<dyn MutationListener>> = self
            .listeners
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();

        let mut first_error = None;
        for listener in listeners {
            if let Err(err) = listener.on_mutation(&event).await {
                error!(
                    "Mutation listener failed for property {} ({}): {}",
                    event.record.id, event.kind, err
                );
                first_error.get_or_insert(err);
            }
        }

        match first_error {
            Some(err) => Err(CacheError::Backend(format!(
                "property {} was {} but cache invalidation failed: {}",
                event.record.id, event.kind, err
            ))),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PropertyStore for MemoryPropertyStore {
    async fn list_all(&self) -> Result<Vec<Property>> {
        Ok(self.records.read().await.rows.values().cloned().collect())
    }

    async fn get(&self, id: u64) -> Result<Property> {
        self.records
            .read()
            .await
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| CacheError::NotFound(format!("Property {}", id)))
    }

    async fn create(&self, new: NewProperty) -> Result<Property> {
        if let Some(msg) = new.validate() {
            return Err(CacheError::InvalidRequest(msg));
        }

        let created = {
            let mut records = self.records.write().await;
            records.next_id += 1;
            let property = Property {
                id: records.next_id,
                title: new.title,
                description: new.description,
                price: new.price,
                location: new.location,
                created_at: Utc::now(),
            };
            records.rows.insert(property.id, property.clone());
            property
        };

        debug!("Created property {}", created.id);
        self.notify(MutationEvent::new(MutationKind::Created, created.clone()))
            .await?;
        Ok(created)
    }

    async fn update(&self, id: u64, patch: PropertyPatch) -> Result<Property> {
        if let Some(msg) = patch.validate() {
            return Err(CacheError::InvalidRequest(msg));
        }

        let updated = {
            let mut records = self.records.write().await;
            let property = records
                .rows
                .get_mut(&id)
                .ok_or_else(|| CacheError::NotFound(format!("Property {}", id)))?;
            patch.apply(property);
            property.clone()
        };

        debug!("Updated property {}", id);
        self.notify(MutationEvent::new(MutationKind::Updated, updated.clone()))
            .await?;
        Ok(updated)
    }

    async fn delete(&self, id: u64) -> Result<Property> {
        let removed = self
            .records
            .write()
            .await
            .rows
            .remove(&id)
            .ok_or_else(|| CacheError::NotFound(format!("Property {}", id)))?;

        debug!("Deleted property {}", id);
        self.notify(MutationEvent::new(MutationKind::Deleted, removed.clone()))
            .await?;
        Ok(removed)
    }

    fn subscribe(&self, listener: Arc<dyn MutationListener>) {
        self.listeners
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(listener);
    }
}

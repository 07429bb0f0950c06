//! Record Store Module
//!
//! The durable source of truth for property records and the mutation events
//! its write path emits.

mod events;
mod memory;

pub use events::{MutationEvent, MutationKind, MutationListener};
pub use memory::MemoryPropertyStore;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{NewProperty, Property, PropertyPatch};

/// Create/read/update/delete access to property records.
///
/// Every successful `create`, `update` and `delete` notifies the subscribed
/// listeners once, after the write is committed and before the call returns.
#[async_trait]
pub trait PropertyStore: Send + Sync {
    /// All records ordered by id.
    async fn list_all(&self) -> Result<Vec<Property>>;

    async fn get(&self, id: u64) -> Result<Property>;

    async fn create(&self, new: NewProperty) -> Result<Property>;

    async fn update(&self, id: u64, patch: PropertyPatch) -> Result<Property>;

    /// Removes the record, returning it as it was before removal.
    async fn delete(&self, id: u64) -> Result<Property>;

    /// Registers a listener for mutation events.
    fn subscribe(&self, listener: Arc<dyn MutationListener>);
}

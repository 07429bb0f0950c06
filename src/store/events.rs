//! Mutation events emitted by the record store write path.

use std::fmt;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Property;

/// Which write produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Created,
    Updated,
    Deleted,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            MutationKind::Created => "created",
            MutationKind::Updated => "updated",
            MutationKind::Deleted => "deleted",
        };
        f.write_str(verb)
    }
}

/// A committed write. `record` is the new state, or the removed state for deletes.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationEvent {
    pub kind: MutationKind,
    pub record: Property,
}

impl MutationEvent {
    pub fn new(kind: MutationKind, record: Property) -> Self {
        Self { kind, record }
    }
}

/// Receives mutation events synchronously from the store's write path.
#[async_trait]
pub trait MutationListener: Send + Sync {
    async fn on_mutation(&self, event: &MutationEvent) -> Result<()>;
}

//! Cache Module
//!
//! Read-through caching of the property listing over a pluggable key-value
//! backend, invalidation on every record mutation, and hit/miss reporting.

mod backend;
mod clock;
mod entry;
mod invalidation;
mod manager;
mod memory;
mod metrics;
mod stats;


// Re-export public types
pub use backend::CacheBackend;
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use invalidation::CacheInvalidator;
pub use manager::{CacheManager, ALL_PROPERTIES_KEY, LISTING_TTL_SECS};
pub use memory::{MemoryBackend, MAX_KEY_LENGTH};
pub use metrics::{CacheMetrics, MetricsReporter, STATUS_ERROR, STATUS_SUCCESS};
pub use stats::CacheStats;

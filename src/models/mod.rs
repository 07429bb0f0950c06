//! Data model and response bodies for the property cache service
//!
//! `property` holds the record types shared by the store and the cache,
//! `responses` the DTOs serialized by the HTTP layer.

pub mod property;
pub mod responses;

// Re-export commonly used types
pub use property::{NewProperty, Price, Property, PropertyPatch, PropertySummary};
pub use responses::{ErrorResponse, HealthResponse, ListingResponse, RecordResponse};

//! API Module
//!
//! HTTP handlers and routing for the property cache service.
//!
//! # Endpoints
//! - `GET /properties/` - Cached property listing
//! - `POST /properties/` - Create a property
//! - `GET /properties/metrics/` - Cache hit/miss metrics
//! - `GET /properties/:id` - Fetch one property from the store
//! - `PUT /properties/:id` - Update a property
//! - `DELETE /properties/:id` - Delete a property
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod response_cache;
pub mod routes;

pub use handlers::*;
pub use response_cache::ResponseCache;
pub use routes::create_router;

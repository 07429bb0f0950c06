//! Property Cache - read-through caching for a property listing
//!
//! Serves the full property listing from a shared cache backend, falls back
//! to the record store on a miss, clears the cached listing on every record
//! mutation, and reports keyspace hit/miss metrics.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_cleanup_task;

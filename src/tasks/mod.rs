//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Expiry sweep: Removes expired entries from the in-process cache backend

mod cleanup;

pub use cleanup::spawn_cleanup_task;

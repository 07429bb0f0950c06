//! Expiry Sweep Task
//!
//! Background task that periodically removes expired backend entries. Reads
//! already treat expired entries as absent; the sweep only reclaims memory.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::MemoryBackend;

/// Spawns a background task that purges expired entries every
/// `cleanup_interval_secs` seconds.
///
/// Returns the JoinHandle so the task can be aborted during graceful shutdown.
///
/// # Example
/// ```ignore
/// let backend = Arc::new(MemoryBackend::new(1000));
/// let cleanup_handle = spawn_cleanup_task(backend.clone(), 1);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(
    backend: Arc<MemoryBackend>,
    cleanup_interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting expiry sweep with interval of {} seconds",
            interval.as_secs()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = backend.purge_expired().await;
            if removed > 0 {
                info!("Expiry sweep: removed {} expired entries", removed);
            } else {
                debug!("Expiry sweep: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheBackend, ManualClock};

    #[tokio::test(start_paused = true)]
    async fn test_cleanup_task_removes_expired_entries() {
        let clock = Arc::new(ManualClock::new(0));
        let backend = Arc::new(MemoryBackend::with_clock(100, clock.clone()));
        backend.set("expire_soon", "value".to_string(), 1).await.unwrap();
        backend.set("long_lived", "value".to_string(), 3600).await.unwrap();

        let handle = spawn_cleanup_task(backend.clone(), 1);
        clock.advance(Duration::from_secs(2));
        tokio::time::sleep(Duration::from_millis(1500)).await;

        assert_eq!(backend.len().await, 1);
        assert!(backend.contains_key("long_lived").await);

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let handle = spawn_cleanup_task(Arc::new(MemoryBackend::new(10)), 1);

        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}

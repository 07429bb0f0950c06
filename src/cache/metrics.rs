//! Metrics Reporter
//!
//! Derives cache effectiveness from the backend's cumulative keyspace
//! counters. Reports are computed on demand and never stored.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error};

use crate::cache::CacheBackend;

/// `status` of a report computed from live counters.
pub const STATUS_SUCCESS: &str = "success";

/// `status` of a report produced when the counters could not be read.
pub const STATUS_ERROR: &str = "error";

// == Cache Metrics ==
/// Snapshot of keyspace counters plus the derived hit ratio (percent).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheMetrics {
    pub keyspace_hits: u64,
    pub keyspace_misses: u64,
    pub total_requests: u64,
    /// `hits / total * 100` rounded to two decimals, 0.0 without traffic
    pub hit_ratio: f64,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CacheMetrics {
    /// Builds a successful report from raw counters.
    pub fn from_counters(hits: u64, misses: u64) -> Self {
        let total_requests = hits.saturating_add(misses);
        Self {
            keyspace_hits: hits,
            keyspace_misses: misses,
            total_requests,
            hit_ratio: hit_ratio(hits, total_requests),
            status: STATUS_SUCCESS.to_string(),
            error: None,
        }
    }

    /// Builds a zeroed report flagged as an error.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            keyspace_hits: 0,
            keyspace_misses: 0,
            total_requests: 0,
            hit_ratio: 0.0,
            status: STATUS_ERROR.to_string(),
            error: Some(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == STATUS_ERROR
    }
}

/// Percentage of hits, rounded half away from zero to two decimals.
fn hit_ratio(hits: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let percent = hits as f64 / total as f64 * 100.0;
    (percent * 100.0).round() / 100.0
}

// == Metrics Reporter ==
#[derive(Clone)]
pub struct MetricsReporter {
    backend: Arc<dyn CacheBackend>,
}

impl MetricsReporter {
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self { backend }
    }

    // == Get Cache Metrics ==
    /// Reads the backend counters. Never fails: an unreachable backend yields
    /// a report with `status = "error"` and zeroed numbers.
    pub async fn get_cache_metrics(&self) -> CacheMetrics {
        match self.backend.stats().await {
            Ok(stats) => {
                let metrics = CacheMetrics::from_counters(stats.hits, stats.misses);
                debug!(
                    "Cache metrics: hits={}, misses={}, hit_ratio={}%",
                    metrics.keyspace_hits, metrics.keyspace_misses, metrics.hit_ratio
                );
                metrics
            }
            Err(err) => {
                error!("Error retrieving cache metrics: {}", err);
                CacheMetrics::error(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheStats, MemoryBackend};
    use crate::error::{CacheError, Result};
    use async_trait::async_trait;

    /// Reports fixed counters, or fails when none are configured.
    struct FixedStats(Option<CacheStats>);

    #[async_trait]
    impl CacheBackend for FixedStats {
        async fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }
        async fn set(&self, _key: &str, _value: String, _ttl: u64) -> Result<()> {
            Ok(())
        }
        async fn delete(&self, _key: &str) -> Result<bool> {
            Ok(false)
        }
        async fn stats(&self) -> Result<CacheStats> {
            self.0
                .ok_or_else(|| CacheError::Backend("INFO command not supported".to_string()))
        }
    }

    fn reporter(stats: Option<CacheStats>) -> MetricsReporter {
        MetricsReporter::new(Arc::new(FixedStats(stats)))
    }

    #[tokio::test]
    async fn test_metrics_derivation() {
        let metrics = reporter(Some(CacheStats::from_counters(1250, 350)))
            .get_cache_metrics()
            .await;

        assert_eq!(metrics.keyspace_hits, 1250);
        assert_eq!(metrics.keyspace_misses, 350);
        assert_eq!(metrics.total_requests, 1600);
        assert_eq!(metrics.hit_ratio, 78.13);
        assert_eq!(metrics.status, "success");
        assert!(metrics.error.is_none());
    }

    #[tokio::test]
    async fn test_zero_traffic() {
        let metrics = reporter(Some(CacheStats::new())).get_cache_metrics().await;

        assert_eq!(metrics.total_requests, 0);
        assert_eq!(metrics.hit_ratio, 0.0);
        assert!(!metrics.is_error());
    }

    #[tokio::test]
    async fn test_unavailable_backend_reports_error() {
        let metrics = reporter(None).get_cache_metrics().await;

        assert!(metrics.is_error());
        assert_eq!(metrics.keyspace_hits, 0);
        assert_eq!(metrics.keyspace_misses, 0);
        assert_eq!(metrics.total_requests, 0);
        assert_eq!(metrics.hit_ratio, 0.0);
        assert!(metrics.error.unwrap().contains("INFO command not supported"));
    }

    #[tokio::test]
    async fn test_reads_live_backend_counters() {
        let backend = Arc::new(MemoryBackend::new(10));
        backend.set("k", "v".to_string(), 60).await.unwrap();
        backend.get("k").await.unwrap();
        backend.get("k").await.unwrap();
        backend.get("absent").await.unwrap();

        let metrics = MetricsReporter::new(backend).get_cache_metrics().await;

        assert_eq!(metrics.total_requests, 3);
        assert_eq!(metrics.hit_ratio, 66.67);
    }

    #[test]
    fn test_hit_ratio_edges() {
        assert_eq!(hit_ratio(5, 5), 100.0);
        assert_eq!(hit_ratio(0, 5), 0.0);
        assert_eq!(hit_ratio(1, 3), 33.33);
    }

    #[test]
    fn test_serialized_shape() {
        let ok = serde_json::to_value(CacheMetrics::from_counters(3, 1)).unwrap();
        assert_eq!(ok["hit_ratio"], 75.0);
        assert_eq!(ok["status"], "success");
        assert!(ok.get("error").is_none());

        let failed = serde_json::to_value(CacheMetrics::error("down")).unwrap();
        assert_eq!(failed["status"], "error");
        assert_eq!(failed["error"], "down");
        assert_eq!(failed["total_requests"], 0);
    }
}

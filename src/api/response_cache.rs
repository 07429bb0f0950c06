//! Response Cache
//!
//! Memoizes rendered response bodies in the cache backend, keyed by request
//! identity. This layer sits outside the listing cache: record mutations do
//! not clear it, so a memoized body can trail the store by up to its TTL.

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::CacheBackend;
use crate::error::Result;

/// Prefix of every backend key written by the response cache.
pub const RESPONSE_KEY_PREFIX: &str = "response:";

/// Default lifetime of a memoized response in seconds.
pub const RESPONSE_TTL_SECS: u64 = 900;

#[derive(Clone)]
pub struct ResponseCache {
    backend: Arc<dyn CacheBackend>,
    ttl_seconds: u64,
}

impl ResponseCache {
    /// A response cache holding bodies for `ttl_seconds`; 0 disables it.
    pub fn new(backend: Arc<dyn CacheBackend>, ttl_seconds: u64) -> Self {
        Self {
            backend,
            ttl_seconds,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.ttl_seconds > 0
    }

    /// Backend key for a request identity such as `GET /properties/`.
    pub fn key_for(request: &str) -> String {
        format!("{}{}", RESPONSE_KEY_PREFIX, request)
    }

    // == Fetch ==
    /// Returns the memoized body for `request`, or renders, stores and returns it.
    ///
    /// Backend failures are logged and bypassed; render failures propagate and
    /// are never memoized.
    pub async fn fetch<F, Fut>(&self, request: &str, render: F) -> Result<String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String>>,
    {
        if !self.is_enabled() {
            return render().await;
        }

        let key = Self::key_for(request);
        match self.backend.get(&key).await {
            Ok(Some(body)) => {
                debug!("Response cache HIT for '{}'", request);
                return Ok(body);
            }
            Ok(None) => debug!("Response cache MISS for '{}'", request),
            Err(err) => warn!("Response cache read failed for '{}': {}", request, err),
        }

        let body = render().await?;
        if let Err(err) = self.backend.set(&key, body.clone(), self.ttl_seconds).await {
            warn!("Response cache write failed for '{}': {}", request, err);
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryBackend;
    use crate::error::CacheError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_memoizes_until_expiry() {
        let backend = Arc::new(MemoryBackend::new(10));
        let cache = ResponseCache::new(backend.clone(), RESPONSE_TTL_SECS);
        let renders = AtomicUsize::new(0);

        for _ in 0..3 {
            let body = cache
                .fetch("GET /properties/", || async {
                    renders.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, CacheError>("body".to_string())
                })
                .await
                .unwrap();
            assert_eq!(body, "body");
        }

        assert_eq!(renders.load(Ordering::SeqCst), 1);
        assert!(backend.contains_key("response:GET /properties/").await);
    }

    #[tokio::test]
    async fn test_disabled_always_renders() {
        let backend = Arc::new(MemoryBackend::new(10));
        let cache = ResponseCache::new(backend.clone(), 0);
        let renders = AtomicUsize::new(0);

        for _ in 0..2 {
            cache
                .fetch("GET /properties/", || async {
                    renders.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, CacheError>(String::new())
                })
                .await
                .unwrap();
        }

        assert!(!cache.is_enabled());
        assert_eq!(renders.load(Ordering::SeqCst), 2);
        assert!(backend.is_empty().await);
    }

    #[tokio::test]
    async fn test_render_errors_are_not_memoized() {
        let backend = Arc::new(MemoryBackend::new(10));
        let cache = ResponseCache::new(backend.clone(), RESPONSE_TTL_SECS);

        let result = cache
            .fetch("GET /properties/", || async {
                Err::<String, _>(CacheError::Store("down".to_string()))
            })
            .await;

        assert!(matches!(result, Err(CacheError::Store(_))));
        assert!(backend.is_empty().await);
    }
}

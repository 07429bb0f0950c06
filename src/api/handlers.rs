//! API Handlers
//!
//! HTTP request handlers for the property listing, mutations and metrics.

use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::api::ResponseCache;
use crate::cache::{CacheBackend, CacheInvalidator, CacheManager, CacheMetrics, MetricsReporter};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{HealthResponse, ListingResponse, NewProperty, PropertyPatch, RecordResponse};
use crate::store::PropertyStore;

/// Application state shared across all handlers.
///
/// The backend and store are injected; the state wires the cache manager,
/// invalidation trigger, metrics reporter and response cache over them.
#[derive(Clone)]
pub struct AppState {
    /// Record store, whose writes fire cache invalidation
    pub store: Arc<dyn PropertyStore>,
    /// Read-through listing cache
    pub manager: CacheManager,
    /// Keyspace hit/miss reporting
    pub metrics: MetricsReporter,
    /// Memoized listing responses
    pub response_cache: ResponseCache,
}

impl AppState {
    /// Builds the state from configuration, subscribing the invalidation
    /// trigger to `store`.
    pub fn new(
        config: &Config,
        backend: Arc<dyn CacheBackend>,
        store: Arc<dyn PropertyStore>,
    ) -> Self {
        let manager = CacheManager::new(backend.clone(), store.clone())
            .with_ttl(config.listing_cache_ttl)
            .with_fail_closed(config.cache_fail_closed);
        CacheInvalidator::attach(manager.clone(), store.as_ref());

        Self {
            store,
            manager,
            metrics: MetricsReporter::new(backend.clone()),
            response_cache: ResponseCache::new(backend, config.response_cache_ttl),
        }
    }
}

/// Handler for GET /properties/
///
/// Serves the listing through the response cache and the listing cache.
pub async fn list_properties_handler(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> Result<Response> {
    let request = format!("GET {}", uri);
    let body = state
        .response_cache
        .fetch(&request, || async {
            let properties = state.manager.get_all_properties().await?;
            let body = serde_json::to_string(&ListingResponse::new(properties))?;
            Ok::<_, CacheError>(body)
        })
        .await?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

/// Handler for GET /properties/metrics/
///
/// Always 200; backend failures are reported inside the payload.
pub async fn metrics_handler(State(state): State<AppState>) -> Json<CacheMetrics> {
    Json(state.metrics.get_cache_metrics().await)
}

/// Handler for POST /properties/
pub async fn create_property_handler(
    State(state): State<AppState>,
    Json(req): Json<NewProperty>,
) -> Result<(StatusCode, Json<RecordResponse>)> {
    let created = state.store.create(req).await?;
    Ok((StatusCode::CREATED, Json(RecordResponse::new(created))))
}

/// Handler for GET /properties/:id
pub async fn get_property_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<RecordResponse>> {
    let property = state.store.get(id).await?;
    Ok(Json(RecordResponse::new(property)))
}

/// Handler for PUT /properties/:id
pub async fn update_property_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<PropertyPatch>,
) -> Result<Json<RecordResponse>> {
    let updated = state.store.update(id, req).await?;
    Ok(Json(RecordResponse::new(updated)))
}

/// Handler for DELETE /properties/:id
pub async fn delete_property_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<RecordResponse>> {
    let removed = state.store.delete(id).await?;
    Ok(Json(RecordResponse::new(removed)))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

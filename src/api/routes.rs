//! API Routes
//!
//! Configures the Axum router with all property cache endpoints.

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_property_handler, delete_property_handler, get_property_handler, health_handler,
    list_properties_handler, metrics_handler, update_property_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/properties/",
            get(list_properties_handler).post(create_property_handler),
        )
        .route("/properties/metrics/", get(metrics_handler))
        .route(
            "/properties/:id",
            get(get_property_handler)
                .put(update_property_handler)
                .delete(delete_property_handler),
        )
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

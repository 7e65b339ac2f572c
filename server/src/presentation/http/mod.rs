//! HTTP presentation: the `/stream/:kind/:id.json` contract plus health
//! check and shared middleware.

pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::application::ResolveStreamUseCase;

/// Builds the addon's router. Manifest, catalog, and configure routes are
/// out of scope; this service exposes only the stream contract and a
/// health check.
pub fn build_router(use_case: Arc<ResolveStreamUseCase>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/stream/:kind/:id.json", get(handlers::stream_handler))
        .with_state(use_case)
        .layer(axum::middleware::from_fn(middleware::logging_middleware))
        .layer(middleware::cors_layer())
}

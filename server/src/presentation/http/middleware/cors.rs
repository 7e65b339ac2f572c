//! CORS Middleware
//!
//! Configures Cross-Origin Resource Sharing.

use tower_http::cors::{AllowOrigin, CorsLayer};
use axum::http::{header, Method};
use std::time::Duration;

/// Creates a predefined CORS layer.
///
/// Stremio's desktop and web clients call this addon from whatever origin
/// they're hosted on, so every origin is allowed rather than an allowlist.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(|_, _| true))
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ])
        .max_age(Duration::from_secs(3600))
}

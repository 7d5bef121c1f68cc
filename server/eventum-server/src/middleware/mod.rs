//! HTTP middleware helpers.

use tower_http::cors::{Any, CorsLayer};

/// Permissive CORS layer for the public API surface.
pub fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

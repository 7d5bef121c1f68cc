//! Eventum Server - event and participant registration API
//!
//! This library provides the HTTP surface of Eventum Engine: CRUD over
//! events, capacity-checked participant enrollment inside each event
//! document, and a small reporting endpoint, all backed by a pluggable
//! document store.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod services;
pub mod validation;

// Re-export commonly used types
pub use error::{ApiError, ApiErrorKind};
pub use server::{EventumServer, ServerConfig};

use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Create the main application router with all routes and middleware
pub fn create_app(server: EventumServer) -> Router {
    routes::create_routes()
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::create_cors_layer()),
        )
        .with_state(server)
}

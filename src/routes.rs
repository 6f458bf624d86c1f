//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorten`     - Issue a short code (rate limited per client)
//! - `GET  /{code}`      - Short link redirect
//! - `GET  /ping`        - Liveness probe
//! - `GET  /health`      - Health check: store, cache, rate limiter
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-client token bucket on issuance
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, ping_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Builds the router with all routes and middleware, without path normalization.
///
/// Static routes take precedence over the `/{code}` capture, so `ping`
/// and `health` are never resolved as codes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(ping_handler))
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .merge(api::routes::issuance_routes(state.clone()))
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application service with trailing slashes trimmed.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state))
}

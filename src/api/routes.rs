//! API route configuration.
//!
//! Issuance is rate limited per client via [`crate::api::middleware::rate_limit`].

use crate::api::handlers::shorten_handler;
use crate::api::middleware::rate_limit;
use crate::state::AppState;
use axum::{Router, middleware, routing::post};

/// Issuance routes, guarded by the per-client token bucket.
///
/// # Endpoints
///
/// - `POST /shorten` - Issue a short code
pub fn issuance_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route_layer(middleware::from_fn_with_state(state, rate_limit::layer))
}

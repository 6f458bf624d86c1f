//! Per-client rate limiting middleware backed by [`ClientRateLimiter`].
//!
//! [`ClientRateLimiter`]: crate::infrastructure::rate_limit::ClientRateLimiter

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;

use crate::{error::AppError, state::AppState, utils::client_ip::client_key};

/// Admits or rejects a request against the caller's token bucket.
///
/// The client key is the peer IP, or the forwarded client IP when the
/// service runs behind a trusted proxy. A missing peer address (as in
/// in-process tests) maps every request to one shared key.
///
/// # Errors
///
/// Returns `429 Too Many Requests` when the bucket is empty. The request is
/// not forwarded in that case.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::post, middleware};
/// use crate::api::middleware::rate_limit;
///
/// let limited = Router::new()
///     .route("/shorten", post(shorten_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), rate_limit::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let client = client_key(req.headers(), peer, st.behind_proxy);

    if !st.rate_limiter.admit(&client).is_allowed() {
        tracing::debug!(client = %client, "Rate limit exceeded");
        return Err(AppError::too_many_requests(
            "Too many requests",
            serde_json::json!({ "reason": "Rate limit exceeded, retry later" }),
        ));
    }

    Ok(next.run(req).await)
}

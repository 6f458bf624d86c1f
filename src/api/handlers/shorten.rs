//! Handler for link shortening endpoint.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::application::services::IssueRequest;
use crate::error::AppError;
use crate::state::AppState;

/// Issues a short code for a long URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com",
///   "days": 3,
///   "custom_code": "my-link"
/// }
/// ```
///
/// `custom_code` is optional; without it a random code is generated.
///
/// # Response
///
/// `201 Created` with `{"code": "my-link"}`.
///
/// # Errors
///
/// - 400 for a malformed URL, out-of-range `days` or a malformed custom code
/// - 409 if the custom code is already taken
/// - 429 when the client's rate limit is exhausted (see middleware)
/// - 500 on storage failures
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;

    let link = state
        .issuance_service
        .issue(IssueRequest {
            target: payload.url,
            days: payload.days,
            custom_code: payload.custom_code,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ShortenResponse { code: link.code })))
}

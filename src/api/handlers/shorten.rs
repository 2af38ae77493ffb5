//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::short_url::build_short_url;

/// Creates a short URL, or returns the existing one for the same URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/some/long/path",
///   "expires_in": 30
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "short_url": "https://s.example.com/aB3xY9",
///   "original_url": "https://example.com/some/long/path",
///   "short_code": "aB3xY9",
///   "expires_at": "2025-02-01T12:00:00Z"
/// }
/// ```
///
/// # Response Codes
///
/// - **201 Created**: A new mapping was created
/// - **200 OK**: The URL was already shortened; the existing mapping is returned
/// - **400 Bad Request**: The body is not a valid request, the URL is malformed
///   or `expires_in` is out of range
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let outcome = state
        .shortener
        .create(&payload.url, payload.expires_in)
        .await?;

    let status = if outcome.is_created() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    let mapping = outcome.into_mapping();
    let short_url = build_short_url(state.base_url.as_deref(), &headers, &mapping.short_code);

    Ok((status, Json(ShortenResponse::new(mapping, short_url))))
}

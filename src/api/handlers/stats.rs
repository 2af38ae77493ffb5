//! Handler for per-code statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns statistics for a short code.
///
/// # Endpoint
///
/// `GET /stats/{code}`
///
/// The click count may lag behind recent redirects by up to the stats cache
/// TTL. Expired codes still report statistics.
///
/// # Response
///
/// ```json
/// {
///   "original_url": "https://example.com",
///   "short_code": "aB3xY9",
///   "click_count": 42,
///   "created_at": "2025-01-01T12:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn stats_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>, AppError> {
    let stats = state.shortener.stats(&code).await?;
    Ok(Json(stats.into()))
}

//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;

use crate::api::dto::health::HealthResponse;
use crate::application::services::HealthStatus;
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: `healthy`, or `degraded` when only the cache is down
/// - **503 Service Unavailable**: `unhealthy`, the database is unreachable
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "quicklink",
///   "version": "0.1.0",
///   "timestamp": "2025-01-01T12:00:00Z",
///   "database": { "healthy": true },
///   "cache": { "healthy": true }
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let report = state.shortener.health().await;

    let status = match report.status {
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
    };

    (status, Json(HealthResponse::from_report(report, Utc::now())))
}

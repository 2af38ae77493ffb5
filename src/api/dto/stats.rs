//! DTOs for statistics endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::StatsSnapshot;

/// Statistics for a single short code.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub original_url: String,
    pub short_code: String,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<StatsSnapshot> for StatsResponse {
    fn from(stats: StatsSnapshot) -> Self {
        Self {
            original_url: stats.original_url,
            short_code: stats.short_code,
            click_count: stats.click_count,
            created_at: stats.created_at,
            expires_at: stats.expires_at,
        }
    }
}

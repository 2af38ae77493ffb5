//! URL mapping entity representing a shortened URL and its click statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored mapping between a short code and the original URL.
///
/// The durable store is the only authority for this record; cached copies are
/// snapshots that may lag behind `click_count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlMapping {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub click_count: i64,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UrlMapping {
    /// Returns true if the mapping expired strictly before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at < now)
    }

    /// Builds the public statistics view of this mapping with the given click count.
    pub fn to_stats(&self, click_count: i64) -> StatsSnapshot {
        StatsSnapshot {
            original_url: self.original_url.clone(),
            short_code: self.short_code.clone(),
            click_count,
            created_at: self.created_at,
            expires_at: self.expires_at,
        }
    }
}

/// Input data for inserting a new mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlMapping {
    pub original_url: String,
    pub short_code: String,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Point-in-time statistics for a short code, cached separately from the mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub original_url: String,
    pub short_code: String,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

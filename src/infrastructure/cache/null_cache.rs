//! No-op cache used in degraded mode.

use super::service::CacheService;
use crate::domain::entities::{StatsSnapshot, UrlMapping};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// A cache implementation that does nothing.
///
/// Selected when Redis is not configured or could not be reached at startup.
/// Every read is a miss, every write is dropped, and the health probe reports
/// unhealthy so `/health` shows the service as degraded. The process never
/// tries to leave this mode.
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for NullCache {
    async fn get_mapping(&self, _short_code: &str) -> Option<UrlMapping> {
        None
    }

    async fn put_mapping(&self, _short_code: &str, _mapping: &UrlMapping, _ttl: Duration) {}

    async fn get_original_url_code(&self, _original_url: &str) -> Option<String> {
        None
    }

    async fn put_original_url_code(&self, _original_url: &str, _short_code: &str, _ttl: Duration) {
    }

    async fn get_stats(&self, _short_code: &str) -> Option<StatsSnapshot> {
        None
    }

    async fn put_stats(&self, _short_code: &str, _stats: &StatsSnapshot, _ttl: Duration) {}

    async fn increment_clicks(&self, _short_code: &str, _ttl: Duration) {}

    async fn get_clicks(&self, _short_code: &str) -> Option<i64> {
        None
    }

    async fn invalidate(&self, _short_code: &str) {}

    async fn is_healthy(&self) -> bool {
        false
    }
}

//! Cache service trait and error types.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

use crate::domain::entities::{StatsSnapshot, UrlMapping};

/// Errors that can occur inside a cache backend.
///
/// These never cross the [`CacheService`] boundary: backends log them and
/// report a miss (reads) or drop the write.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),

    #[error("Cache operation error: {0}")]
    OperationError(String),

    #[error("Cache serialization error: {0}")]
    SerializationError(String),
}

impl From<redis::RedisError> for CacheError {
    fn from(e: redis::RedisError) -> Self {
        Self::OperationError(e.to_string())
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(e: serde_json::Error) -> Self {
        Self::SerializationError(e.to_string())
    }
}

/// Result type for cache backend internals.
pub type CacheResult<T> = Result<T, CacheError>;

/// Best-effort, TTL-bounded cache in front of the durable store.
///
/// Four independent entry kinds are kept per short code or URL:
///
/// - mapping by short code
/// - short code by original-URL hash
/// - statistics snapshot by short code
/// - click counter by short code
///
/// All methods are fail-open. Reads return `None` on a miss *or* on any backend
/// failure, writes silently drop on failure. Callers never need to handle
/// cache errors.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache
/// - [`crate::infrastructure::cache::InMemoryCache`] - process-local cache
/// - [`crate::infrastructure::cache::NullCache`] - degraded mode, every call is a no-op
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the cached mapping snapshot for a short code.
    async fn get_mapping(&self, short_code: &str) -> Option<UrlMapping>;

    /// Caches a mapping snapshot under its short code.
    async fn put_mapping(&self, short_code: &str, mapping: &UrlMapping, ttl: Duration);

    /// Looks up the short code previously cached for an original URL.
    ///
    /// The key is a hash of the URL, so a collision may return the code of a
    /// different URL.
    async fn get_original_url_code(&self, original_url: &str) -> Option<String>;

    /// Caches the short code for an original URL.
    async fn put_original_url_code(&self, original_url: &str, short_code: &str, ttl: Duration);

    /// Retrieves a cached statistics snapshot.
    async fn get_stats(&self, short_code: &str) -> Option<StatsSnapshot>;

    /// Caches a statistics snapshot.
    async fn put_stats(&self, short_code: &str, stats: &StatsSnapshot, ttl: Duration);

    /// Atomically increments the click counter, creating it at 1 when absent.
    ///
    /// The counter's TTL is refreshed to `ttl` on every increment.
    async fn increment_clicks(&self, short_code: &str, ttl: Duration);

    /// Reads the click counter.
    async fn get_clicks(&self, short_code: &str) -> Option<i64>;

    /// Removes the mapping, statistics and click-counter entries for a short code.
    ///
    /// Idempotent; missing entries are fine.
    async fn invalidate(&self, short_code: &str);

    /// Actively probes the backend.
    ///
    /// Used for health reporting only, never for request-path decisions.
    async fn is_healthy(&self) -> bool;
}

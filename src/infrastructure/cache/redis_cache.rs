//! Redis-backed cache implementation.

use super::keys::CacheKey;
use super::service::{CacheError, CacheResult, CacheService};
use crate::domain::entities::{StatsSnapshot, UrlMapping};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Redis cache implementation.
///
/// Uses a single `ConnectionManager` shared by all callers; cloning it is cheap
/// and every clone multiplexes over the same connection.
/// All operations are fail-open: errors are logged but don't propagate to callers.
#[derive(Clone)]
pub struct RedisCache {
    client: ConnectionManager,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Arguments
    ///
    /// - `redis_url` - Redis connection string (e.g., `"redis://localhost:6379/0"`)
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let cache = Self { client: manager };
        cache
            .ping()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(cache)
    }

    async fn ping(&self) -> CacheResult<()> {
        let mut conn = self.client.clone();
        redis::cmd("PING").query_async::<String>(&mut conn).await?;
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(&self, key: &CacheKey) -> CacheResult<Option<T>> {
        let mut conn = self.client.clone();
        let raw: Option<String> = conn.get(key.to_string()).await?;
        match raw {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    async fn set_json<T: Serialize + Sync>(
        &self,
        key: &CacheKey,
        value: &T,
        ttl: Duration,
    ) -> CacheResult<()> {
        let payload = serde_json::to_string(value)?;
        let mut conn = self.client.clone();
        conn.set_ex::<_, _, ()>(key.to_string(), payload, ttl_seconds(ttl))
            .await?;
        Ok(())
    }

    async fn get_string(&self, key: &CacheKey) -> CacheResult<Option<String>> {
        let mut conn = self.client.clone();
        Ok(conn.get(key.to_string()).await?)
    }

    async fn set_string(&self, key: &CacheKey, value: &str, ttl: Duration) -> CacheResult<()> {
        let mut conn = self.client.clone();
        conn.set_ex::<_, _, ()>(key.to_string(), value, ttl_seconds(ttl))
            .await?;
        Ok(())
    }

    async fn incr_with_ttl(&self, key: &CacheKey, ttl: Duration) -> CacheResult<()> {
        let key = key.to_string();
        let mut conn = self.client.clone();
        redis::pipe()
            .atomic()
            .incr(&key, 1i64)
            .ignore()
            .expire(&key, ttl_seconds(ttl) as i64)
            .ignore()
            .query_async::<()>(&mut conn)
            .await?;
        Ok(())
    }

    async fn get_counter(&self, key: &CacheKey) -> CacheResult<Option<i64>> {
        let mut conn = self.client.clone();
        Ok(conn.get(key.to_string()).await?)
    }

    async fn delete(&self, keys: &[CacheKey]) -> CacheResult<i64> {
        let keys: Vec<String> = keys.iter().map(ToString::to_string).collect();
        let mut conn = self.client.clone();
        Ok(conn.del(keys).await?)
    }
}

/// Redis rejects `SETEX` with a zero TTL, so sub-second TTLs round up to one second.
fn ttl_seconds(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

/// Logs a failed read and reports it as a miss.
fn read_or_miss<T>(key: &CacheKey, result: CacheResult<Option<T>>) -> Option<T> {
    match result {
        Ok(Some(value)) => {
            debug!("Cache HIT: {}", key);
            Some(value)
        }
        Ok(None) => {
            debug!("Cache MISS: {}", key);
            None
        }
        Err(e) => {
            warn!("Redis GET error for {}: {}", key, e);
            None
        }
    }
}

/// Logs a failed write and drops it.
fn write_or_drop(key: &CacheKey, ttl: Duration, result: CacheResult<()>) {
    match result {
        Ok(()) => debug!("Cache SET: {} (TTL: {}s)", key, ttl_seconds(ttl)),
        Err(e) => warn!("Redis SET error for {}: {}", key, e),
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_mapping(&self, short_code: &str) -> Option<UrlMapping> {
        let key = CacheKey::mapping(short_code);
        read_or_miss(&key, self.get_json(&key).await)
    }

    async fn put_mapping(&self, short_code: &str, mapping: &UrlMapping, ttl: Duration) {
        let key = CacheKey::mapping(short_code);
        write_or_drop(&key, ttl, self.set_json(&key, mapping, ttl).await);
    }

    async fn get_original_url_code(&self, original_url: &str) -> Option<String> {
        let key = CacheKey::original_url(original_url);
        read_or_miss(&key, self.get_string(&key).await)
    }

    async fn put_original_url_code(&self, original_url: &str, short_code: &str, ttl: Duration) {
        let key = CacheKey::original_url(original_url);
        write_or_drop(&key, ttl, self.set_string(&key, short_code, ttl).await);
    }

    async fn get_stats(&self, short_code: &str) -> Option<StatsSnapshot> {
        let key = CacheKey::stats(short_code);
        read_or_miss(&key, self.get_json(&key).await)
    }

    async fn put_stats(&self, short_code: &str, stats: &StatsSnapshot, ttl: Duration) {
        let key = CacheKey::stats(short_code);
        write_or_drop(&key, ttl, self.set_json(&key, stats, ttl).await);
    }

    async fn increment_clicks(&self, short_code: &str, ttl: Duration) {
        let key = CacheKey::clicks(short_code);
        if let Err(e) = self.incr_with_ttl(&key, ttl).await {
            warn!("Redis INCR error for {}: {}", key, e);
        }
    }

    async fn get_clicks(&self, short_code: &str) -> Option<i64> {
        let key = CacheKey::clicks(short_code);
        read_or_miss(&key, self.get_counter(&key).await)
    }

    async fn invalidate(&self, short_code: &str) {
        match self.delete(&CacheKey::per_code(short_code)).await {
            Ok(deleted) => {
                if deleted > 0 {
                    debug!("Cache INVALIDATE: {} ({} keys)", short_code, deleted);
                }
            }
            Err(e) => warn!("Redis DEL error for {}: {}", short_code, e),
        }
    }

    async fn is_healthy(&self) -> bool {
        self.ping().await.is_ok()
    }
}

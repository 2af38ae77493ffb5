//! Process-local cache with per-entry TTLs.

use super::keys::CacheKey;
use super::service::CacheService;
use crate::domain::clock::{Clock, SystemClock};
use crate::domain::entities::{StatsSnapshot, UrlMapping};
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Clone)]
enum CachedValue {
    Mapping(UrlMapping),
    Code(String),
    Stats(StatsSnapshot),
    Clicks(i64),
}

#[derive(Debug, Clone)]
struct Entry {
    value: CachedValue,
    expires_at: DateTime<Utc>,
}

/// In-memory implementation of [`CacheService`].
///
/// Uses the same key layout and TTL semantics as [`super::RedisCache`], with
/// expiry evaluated against an injected [`Clock`]. Expired entries are
/// dropped lazily on access. Suited to single-instance deployments and tests.
pub struct InMemoryCache {
    entries: RwLock<HashMap<CacheKey, Entry>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// Number of live (unexpired) entries.
    pub async fn len(&self) -> usize {
        let now = self.clock.now();
        self.entries
            .read()
            .await
            .values()
            .filter(|entry| entry.expires_at > now)
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn deadline(&self, ttl: Duration) -> DateTime<Utc> {
        let ttl = TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX);
        self.clock
            .now()
            .checked_add_signed(ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    async fn get(&self, key: &CacheKey) -> Option<CachedValue> {
        let now = self.clock.now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.expires_at > now => {
                    debug!("Cache HIT: {}", key);
                    return Some(entry.value.clone());
                }
                Some(_) => {}
                None => {
                    debug!("Cache MISS: {}", key);
                    return None;
                }
            }
        }

        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|entry| entry.expires_at <= now) {
            entries.remove(key);
        }
        debug!("Cache EXPIRED: {}", key);
        None
    }

    async fn set(&self, key: CacheKey, value: CachedValue, ttl: Duration) {
        let expires_at = self.deadline(ttl);
        self.entries
            .write()
            .await
            .insert(key, Entry { value, expires_at });
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for InMemoryCache {
    async fn get_mapping(&self, short_code: &str) -> Option<UrlMapping> {
        match self.get(&CacheKey::mapping(short_code)).await {
            Some(CachedValue::Mapping(mapping)) => Some(mapping),
            _ => None,
        }
    }

    async fn put_mapping(&self, short_code: &str, mapping: &UrlMapping, ttl: Duration) {
        self.set(
            CacheKey::mapping(short_code),
            CachedValue::Mapping(mapping.clone()),
            ttl,
        )
        .await;
    }

    async fn get_original_url_code(&self, original_url: &str) -> Option<String> {
        match self.get(&CacheKey::original_url(original_url)).await {
            Some(CachedValue::Code(code)) => Some(code),
            _ => None,
        }
    }

    async fn put_original_url_code(&self, original_url: &str, short_code: &str, ttl: Duration) {
        self.set(
            CacheKey::original_url(original_url),
            CachedValue::Code(short_code.to_string()),
            ttl,
        )
        .await;
    }

    async fn get_stats(&self, short_code: &str) -> Option<StatsSnapshot> {
        match self.get(&CacheKey::stats(short_code)).await {
            Some(CachedValue::Stats(stats)) => Some(stats),
            _ => None,
        }
    }

    async fn put_stats(&self, short_code: &str, stats: &StatsSnapshot, ttl: Duration) {
        self.set(
            CacheKey::stats(short_code),
            CachedValue::Stats(stats.clone()),
            ttl,
        )
        .await;
    }

    async fn increment_clicks(&self, short_code: &str, ttl: Duration) {
        let key = CacheKey::clicks(short_code);
        let now = self.clock.now();
        let expires_at = self.deadline(ttl);

        let mut entries = self.entries.write().await;
        let current = match entries.get(&key) {
            Some(Entry {
                value: CachedValue::Clicks(count),
                expires_at,
            }) if *expires_at > now => *count,
            _ => 0,
        };

        entries.insert(
            key,
            Entry {
                value: CachedValue::Clicks(current.saturating_add(1)),
                expires_at,
            },
        );
    }

    async fn get_clicks(&self, short_code: &str) -> Option<i64> {
        match self.get(&CacheKey::clicks(short_code)).await {
            Some(CachedValue::Clicks(count)) => Some(count),
            _ => None,
        }
    }

    async fn invalidate(&self, short_code: &str) {
        let mut entries = self.entries.write().await;
        for key in CacheKey::per_code(short_code) {
            entries.remove(&key);
        }
        debug!("Cache INVALIDATE: {}", short_code);
    }

    async fn is_healthy(&self) -> bool {
        true
    }
}

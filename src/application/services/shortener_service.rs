//! Shortening service: cache-aside orchestration of create, redirect, stats and health.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::application::click_worker::track_click;
use crate::domain::click_event::ClickEvent;
use crate::domain::clock::{Clock, SystemClock};
use crate::domain::entities::{NewUrlMapping, StatsSnapshot, UrlMapping};
use crate::domain::repositories::UrlRepository;
use crate::domain::task_spawner::TaskSpawner;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::code_generator::generate_code;
use crate::utils::url_validator::is_valid_url;

/// Insert attempts before giving up on finding a free short code.
const MAX_CODE_ATTEMPTS: usize = 5;

/// Time-to-live settings for cache entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// TTL of mapping, original-URL and click-counter entries.
    pub mapping_ttl: Duration,
    /// TTL of statistics snapshots.
    pub stats_ttl: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            mapping_ttl: Duration::from_secs(24 * 60 * 60),
            stats_ttl: Duration::from_secs(5 * 60),
        }
    }
}

/// Result of [`ShortenerService::create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortenOutcome {
    /// A new mapping was inserted.
    Created(UrlMapping),
    /// A mapping for the URL already existed and was returned instead.
    Existing(UrlMapping),
}

impl ShortenOutcome {
    pub fn mapping(&self) -> &UrlMapping {
        match self {
            Self::Created(mapping) | Self::Existing(mapping) => mapping,
        }
    }

    pub fn into_mapping(self) -> UrlMapping {
        match self {
            Self::Created(mapping) | Self::Existing(mapping) => mapping,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Overall service health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    /// The cache is down; requests are served from the durable store alone.
    Degraded,
    /// The durable store is down; the service cannot function.
    Unhealthy,
}

/// Result of [`ShortenerService::health`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub database_healthy: bool,
    pub cache_healthy: bool,
}

impl HealthReport {
    pub fn from_checks(database_healthy: bool, cache_healthy: bool) -> Self {
        let status = if !database_healthy {
            HealthStatus::Unhealthy
        } else if !cache_healthy {
            HealthStatus::Degraded
        } else {
            HealthStatus::Healthy
        };

        Self {
            status,
            database_healthy,
            cache_healthy,
        }
    }
}

/// Orchestrates every operation across the cache and the durable store.
///
/// Reads are cache-aside: consult the cache, fall back to the store on a miss,
/// then repopulate the cache. Cache problems never fail a request. Store
/// problems do.
///
/// The create-dedup check and click accounting are deliberately not
/// transactional. Two concurrent creates for one URL may produce two codes,
/// and concurrent redirects of one code may undercount clicks.
pub struct ShortenerService {
    repository: Arc<dyn UrlRepository>,
    cache: Arc<dyn CacheService>,
    spawner: Arc<dyn TaskSpawner>,
    clock: Arc<dyn Clock>,
    policy: CachePolicy,
}

impl ShortenerService {
    /// Creates a service with the system clock and the default cache policy.
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        cache: Arc<dyn CacheService>,
        spawner: Arc<dyn TaskSpawner>,
    ) -> Self {
        Self {
            repository,
            cache,
            spawner,
            clock: Arc::new(SystemClock),
            policy: CachePolicy::default(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_cache_policy(mut self, policy: CachePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn cache_policy(&self) -> CachePolicy {
        self.policy
    }

    /// Shortens a URL, or returns the existing mapping for it.
    ///
    /// # Lookup order
    ///
    /// 1. Cache: original-URL index, then the mapping it points at
    /// 2. Store: exact match on the original URL (repopulates the cache)
    /// 3. Insert a fresh mapping with a newly generated code
    ///
    /// `expires_in_days` only takes effect when positive.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL lacks a scheme or host, or
    /// the expiry is out of range.
    /// Returns [`AppError::Internal`] on store errors or when no free code was
    /// found after several attempts.
    pub async fn create(
        &self,
        original_url: &str,
        expires_in_days: Option<i64>,
    ) -> Result<ShortenOutcome, AppError> {
        if !is_valid_url(original_url) {
            return Err(AppError::bad_request(
                "Invalid URL format",
                json!({ "url": original_url }),
            ));
        }

        if let Some(code) = self.cache.get_original_url_code(original_url).await {
            if let Some(mapping) = self.cache.get_mapping(&code).await {
                record_lookup("original_url", true);
                debug!("Existing short code {} served from cache", code);
                return Ok(ShortenOutcome::Existing(mapping));
            }
        }
        record_lookup("original_url", false);

        if let Some(existing) = self.repository.find_by_original_url(original_url).await? {
            self.cache_mapping(&existing).await;
            return Ok(ShortenOutcome::Existing(existing));
        }

        let expires_at = self.expiry_from_days(expires_in_days)?;
        let mapping = self.insert_with_fresh_code(original_url, expires_at).await?;
        self.cache_mapping(&mapping).await;

        metrics::counter!("links_created_total").increment(1);
        info!("Created short code {}", mapping.short_code);

        Ok(ShortenOutcome::Created(mapping))
    }

    /// Resolves a short code to its original URL and schedules click accounting.
    ///
    /// The click is recorded by a detached task; this method returns without
    /// waiting for it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown codes and
    /// [`AppError::Expired`] for codes whose expiry has passed.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn redirect(&self, short_code: &str) -> Result<String, AppError> {
        let mapping = match self.cache.get_mapping(short_code).await {
            Some(mapping) => {
                record_lookup("mapping", true);
                mapping
            }
            None => {
                record_lookup("mapping", false);
                let mapping = self.find_mapping(short_code).await?;
                self.cache
                    .put_mapping(short_code, &mapping, self.policy.mapping_ttl)
                    .await;
                mapping
            }
        };

        if mapping.is_expired_at(self.clock.now()) {
            return Err(AppError::gone(
                "Short URL has expired",
                json!({ "short_code": short_code, "expired_at": mapping.expires_at }),
            ));
        }

        self.dispatch_click(&mapping);
        metrics::counter!("redirects_total").increment(1);

        Ok(mapping.original_url)
    }

    /// Returns statistics for a short code.
    ///
    /// A cached snapshot may report a click count up to the stats TTL old.
    /// Expired codes still have statistics.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown codes.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn stats(&self, short_code: &str) -> Result<StatsSnapshot, AppError> {
        if let Some(stats) = self.cache.get_stats(short_code).await {
            record_lookup("stats", true);
            return Ok(stats);
        }
        record_lookup("stats", false);

        let mapping = self.find_mapping(short_code).await?;
        let click_count = self
            .cache
            .get_clicks(short_code)
            .await
            .unwrap_or(mapping.click_count);

        let stats = mapping.to_stats(click_count);
        self.cache
            .put_stats(short_code, &stats, self.policy.stats_ttl)
            .await;

        Ok(stats)
    }

    /// Probes the durable store and the cache.
    pub async fn health(&self) -> HealthReport {
        let (database_healthy, cache_healthy) =
            tokio::join!(self.repository.ping(), self.cache.is_healthy());

        if !database_healthy {
            warn!("Health check: database unreachable");
        } else if !cache_healthy {
            debug!("Health check: cache unavailable, running degraded");
        }

        HealthReport::from_checks(database_healthy, cache_healthy)
    }

    async fn find_mapping(&self, short_code: &str) -> Result<UrlMapping, AppError> {
        self.repository
            .find_by_short_code(short_code)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    "Short URL not found",
                    json!({ "short_code": short_code }),
                )
            })
    }

    async fn cache_mapping(&self, mapping: &UrlMapping) {
        let ttl = self.policy.mapping_ttl;
        self.cache
            .put_mapping(&mapping.short_code, mapping, ttl)
            .await;
        self.cache
            .put_original_url_code(&mapping.original_url, &mapping.short_code, ttl)
            .await;
    }

    fn expiry_from_days(
        &self,
        expires_in_days: Option<i64>,
    ) -> Result<Option<DateTime<Utc>>, AppError> {
        let Some(days) = expires_in_days.filter(|days| *days > 0) else {
            return Ok(None);
        };

        TimeDelta::try_days(days)
            .and_then(|delta| self.clock.now().checked_add_signed(delta))
            .map(Some)
            .ok_or_else(|| {
                AppError::bad_request(
                    "Expiration is out of range",
                    json!({ "expires_in": days }),
                )
            })
    }

    async fn insert_with_fresh_code(
        &self,
        original_url: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<UrlMapping, AppError> {
        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let new_mapping = NewUrlMapping {
                original_url: original_url.to_string(),
                short_code: generate_code(),
                expires_at,
            };

            match self.repository.insert(new_mapping).await {
                Ok(mapping) => return Ok(mapping),
                Err(AppError::DuplicateCode { code }) => {
                    warn!(
                        "Short code collision on {} (attempt {}/{})",
                        code, attempt, MAX_CODE_ATTEMPTS
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions", "attempts": MAX_CODE_ATTEMPTS }),
        ))
    }

    fn dispatch_click(&self, mapping: &UrlMapping) {
        let event = ClickEvent::new(mapping.id, &mapping.short_code, mapping.click_count);
        let cache = Arc::clone(&self.cache);
        let repository = Arc::clone(&self.repository);
        let counter_ttl = self.policy.mapping_ttl;

        self.spawner.spawn(Box::pin(async move {
            track_click(cache.as_ref(), repository.as_ref(), counter_ttl, event).await;
        }));
    }
}

fn record_lookup(kind: &'static str, hit: bool) {
    let result = if hit { "hit" } else { "miss" };
    metrics::counter!("cache_lookups_total", "kind" => kind, "result" => result).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::ManualClock;
    use crate::domain::repositories::MockUrlRepository;
    use crate::infrastructure::cache::{InMemoryCache, NullCache};
    use crate::infrastructure::persistence::InMemoryUrlRepository;
    use crate::infrastructure::tasks::DeferredSpawner;

    struct Harness {
        service: ShortenerService,
        repo: Arc<InMemoryUrlRepository>,
        cache: Arc<InMemoryCache>,
        spawner: Arc<DeferredSpawner>,
        clock: Arc<ManualClock>,
    }

    fn harness() -> Harness {
        let clock = Arc::new(ManualClock::default());
        let repo = Arc::new(InMemoryUrlRepository::with_clock(clock.clone()));
        let cache = Arc::new(InMemoryCache::with_clock(clock.clone()));
        let spawner = Arc::new(DeferredSpawner::new());
        let service = ShortenerService::new(repo.clone(), cache.clone(), spawner.clone())
            .with_clock(clock.clone());

        Harness {
            service,
            repo,
            cache,
            spawner,
            clock,
        }
    }

    fn test_mapping(id: i64, code: &str, url: &str) -> UrlMapping {
        let now = Utc::now();
        UrlMapping {
            id,
            original_url: url.to_string(),
            short_code: code.to_string(),
            click_count: 0,
            expires_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_then_redirect_returns_original_url() {
        let h = harness();

        let outcome = h
            .service
            .create("https://example.com/path", None)
            .await
            .unwrap();

        assert!(outcome.is_created());
        let code = outcome.mapping().short_code.clone();
        assert_eq!(code.len(), 6);

        let target = h.service.redirect(&code).await.unwrap();
        assert_eq!(target, "https://example.com/path");
    }

    #[tokio::test]
    async fn test_create_twice_returns_same_code_without_second_row() {
        let h = harness();

        let first = h.service.create("https://example.com", None).await.unwrap();
        let second = h.service.create("https://example.com", None).await.unwrap();

        assert!(first.is_created());
        assert!(!second.is_created());
        assert_eq!(first.mapping().short_code, second.mapping().short_code);
        assert_eq!(h.repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_create_populates_both_cache_indices() {
        let h = harness();

        let outcome = h.service.create("https://example.com", None).await.unwrap();
        let code = &outcome.mapping().short_code;

        assert_eq!(
            h.cache.get_original_url_code("https://example.com").await,
            Some(code.clone())
        );
        assert_eq!(
            h.cache.get_mapping(code).await.as_ref(),
            Some(outcome.mapping())
        );
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_urls() {
        let h = harness();

        for input in ["not a url", "example.com", ""] {
            let result = h.service.create(input, None).await;
            assert!(
                matches!(result, Err(AppError::Validation { .. })),
                "{input:?} should be rejected"
            );
        }
        assert!(h.repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_create_with_expiry_sets_expires_at() {
        let h = harness();

        let outcome = h
            .service
            .create("https://a.example/x", Some(1))
            .await
            .unwrap();

        assert_eq!(
            outcome.mapping().expires_at,
            Some(h.clock.now() + TimeDelta::days(1))
        );
    }

    #[tokio::test]
    async fn test_create_ignores_non_positive_expiry() {
        let h = harness();

        let zero = h.service.create("https://a.example/0", Some(0)).await.unwrap();
        let negative = h
            .service
            .create("https://a.example/neg", Some(-3))
            .await
            .unwrap();

        assert!(zero.mapping().expires_at.is_none());
        assert!(negative.mapping().expires_at.is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_out_of_range_expiry() {
        let h = harness();

        let result = h.service.create("https://a.example", Some(i64::MAX)).await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_create_served_from_cache_skips_store() {
        let cache = Arc::new(InMemoryCache::new());
        let existing = test_mapping(3, "cached", "https://example.com");
        let ttl = CachePolicy::default().mapping_ttl;
        cache.put_mapping("cached", &existing, ttl).await;
        cache
            .put_original_url_code("https://example.com", "cached", ttl)
            .await;

        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_original_url().times(0);
        repo.expect_insert().times(0);

        let service =
            ShortenerService::new(Arc::new(repo), cache, Arc::new(DeferredSpawner::new()));

        let outcome = service.create("https://example.com", None).await.unwrap();

        assert_eq!(outcome, ShortenOutcome::Existing(existing));
    }

    #[tokio::test]
    async fn test_create_falls_back_to_store_when_mapping_entry_missing() {
        let cache = Arc::new(InMemoryCache::new());
        cache
            .put_original_url_code(
                "https://example.com",
                "stale",
                CachePolicy::default().mapping_ttl,
            )
            .await;

        let existing = test_mapping(5, "fromdb", "https://example.com");
        let returned = existing.clone();
        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_original_url()
            .withf(|url| url == "https://example.com")
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));
        repo.expect_insert().times(0);

        let service = ShortenerService::new(
            Arc::new(repo),
            cache.clone(),
            Arc::new(DeferredSpawner::new()),
        );

        let outcome = service.create("https://example.com", None).await.unwrap();

        assert_eq!(outcome, ShortenOutcome::Existing(existing.clone()));
        assert_eq!(
            cache.get_original_url_code("https://example.com").await,
            Some("fromdb".to_string())
        );
        assert_eq!(cache.get_mapping("fromdb").await, Some(existing));
    }

    #[tokio::test]
    async fn test_create_retries_on_duplicate_code() {
        let mut repo = MockUrlRepository::new();
        let mut seq = mockall::Sequence::new();

        repo.expect_find_by_original_url()
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_insert()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|new_mapping| Err(AppError::duplicate_code(new_mapping.short_code)));
        repo.expect_insert()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|new_mapping| {
                Ok(test_mapping(
                    1,
                    &new_mapping.short_code,
                    &new_mapping.original_url,
                ))
            });

        let service = ShortenerService::new(
            Arc::new(repo),
            Arc::new(NullCache::new()),
            Arc::new(DeferredSpawner::new()),
        );

        let outcome = service.create("https://example.com", None).await.unwrap();
        assert!(outcome.is_created());
    }

    #[tokio::test]
    async fn test_create_gives_up_after_repeated_collisions() {
        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_original_url()
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_insert()
            .times(MAX_CODE_ATTEMPTS)
            .returning(|new_mapping| Err(AppError::duplicate_code(new_mapping.short_code)));

        let service = ShortenerService::new(
            Arc::new(repo),
            Arc::new(NullCache::new()),
            Arc::new(DeferredSpawner::new()),
        );

        let result = service.create("https://example.com", None).await;
        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_create_propagates_store_errors() {
        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_original_url()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let service = ShortenerService::new(
            Arc::new(repo),
            Arc::new(NullCache::new()),
            Arc::new(DeferredSpawner::new()),
        );

        let result = service.create("https://example.com", None).await;
        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_redirect_unknown_code_is_not_found() {
        let h = harness();

        let result = h.service.redirect("nope00").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
        assert_eq!(h.spawner.pending(), 0);
    }

    #[tokio::test]
    async fn test_redirect_expired_code_is_gone_not_found() {
        let h = harness();
        let outcome = h
            .service
            .create("https://a.example/x", Some(1))
            .await
            .unwrap();
        let code = outcome.mapping().short_code.clone();

        h.clock.advance(TimeDelta::days(2));

        let result = h.service.redirect(&code).await;
        assert!(matches!(result, Err(AppError::Expired { .. })));
        assert_eq!(h.spawner.pending(), 0);
    }

    #[tokio::test]
    async fn test_redirect_does_not_wait_for_click_accounting() {
        let h = harness();
        let code = h
            .service
            .create("https://example.com", None)
            .await
            .unwrap()
            .into_mapping()
            .short_code;

        h.service.redirect(&code).await.unwrap();

        assert_eq!(h.spawner.pending(), 1);
        let stored = h.repo.find_by_short_code(&code).await.unwrap().unwrap();
        assert_eq!(stored.click_count, 0);

        h.spawner.run_pending().await;

        let stored = h.repo.find_by_short_code(&code).await.unwrap().unwrap();
        assert_eq!(stored.click_count, 1);
    }

    #[tokio::test]
    async fn test_redirect_cache_miss_populates_mapping() {
        let h = harness();
        let code = h
            .service
            .create("https://example.com", None)
            .await
            .unwrap()
            .into_mapping()
            .short_code;
        h.cache.invalidate(&code).await;

        h.service.redirect(&code).await.unwrap();

        assert!(h.cache.get_mapping(&code).await.is_some());
    }

    #[tokio::test]
    async fn test_sequential_redirects_are_all_counted() {
        let h = harness();
        let code = h
            .service
            .create("https://example.com", None)
            .await
            .unwrap()
            .into_mapping()
            .short_code;

        for _ in 0..5 {
            h.service.redirect(&code).await.unwrap();
            h.spawner.run_pending().await;
        }

        let stats = h.service.stats(&code).await.unwrap();
        assert_eq!(stats.click_count, 5);
    }

    #[tokio::test]
    async fn test_concurrent_redirects_may_undercount() {
        let h = harness();
        let code = h
            .service
            .create("https://example.com", None)
            .await
            .unwrap()
            .into_mapping()
            .short_code;

        // Both redirects observe click_count = 0 before either task runs.
        h.service.redirect(&code).await.unwrap();
        h.service.redirect(&code).await.unwrap();
        h.spawner.run_pending().await;

        let stored = h.repo.find_by_short_code(&code).await.unwrap().unwrap();
        assert_eq!(stored.click_count, 1);
    }

    #[tokio::test]
    async fn test_stats_unknown_code_is_not_found() {
        let h = harness();
        assert!(matches!(
            h.service.stats("nope00").await,
            Err(AppError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_stats_is_cached_until_ttl() {
        let h = harness();
        let code = h
            .service
            .create("https://example.com", None)
            .await
            .unwrap()
            .into_mapping()
            .short_code;

        let before = h.service.stats(&code).await.unwrap();
        assert_eq!(before.click_count, 0);

        // A click persisted without going through invalidation stays hidden
        // behind the cached snapshot until it expires.
        let stored = h.repo.find_by_short_code(&code).await.unwrap().unwrap();
        h.repo.update_click_count(stored.id, 9).await.unwrap();

        assert_eq!(h.service.stats(&code).await.unwrap().click_count, 0);

        h.clock.advance(TimeDelta::minutes(5));
        assert_eq!(h.service.stats(&code).await.unwrap().click_count, 9);
    }

    #[tokio::test]
    async fn test_stats_prefers_live_cache_counter() {
        let h = harness();
        let code = h
            .service
            .create("https://example.com", None)
            .await
            .unwrap()
            .into_mapping()
            .short_code;

        let ttl = h.service.cache_policy().mapping_ttl;
        h.cache.increment_clicks(&code, ttl).await;
        h.cache.increment_clicks(&code, ttl).await;

        assert_eq!(h.service.stats(&code).await.unwrap().click_count, 2);
    }

    #[tokio::test]
    async fn test_stats_available_for_expired_code() {
        let h = harness();
        let code = h
            .service
            .create("https://a.example/x", Some(1))
            .await
            .unwrap()
            .into_mapping()
            .short_code;
        h.clock.advance(TimeDelta::days(3));

        let stats = h.service.stats(&code).await.unwrap();
        assert_eq!(stats.short_code, code);
        assert!(stats.expires_at.is_some());
    }

    #[tokio::test]
    async fn test_degraded_cache_serves_everything_from_store() {
        let repo = Arc::new(InMemoryUrlRepository::new());
        let spawner = Arc::new(DeferredSpawner::new());
        let service =
            ShortenerService::new(repo.clone(), Arc::new(NullCache::new()), spawner.clone());

        let first = service.create("https://example.com", None).await.unwrap();
        let second = service.create("https://example.com", None).await.unwrap();
        assert!(first.is_created());
        assert_eq!(first.mapping().short_code, second.mapping().short_code);

        let code = first.into_mapping().short_code;
        assert_eq!(
            service.redirect(&code).await.unwrap(),
            "https://example.com"
        );
        spawner.run_pending().await;

        assert_eq!(service.stats(&code).await.unwrap().click_count, 1);

        let health = service.health().await;
        assert_eq!(health.status, HealthStatus::Degraded);
        assert!(health.database_healthy);
        assert!(!health.cache_healthy);
    }

    // Only the last two characters differ, and 31*'A' + 'a' == 31*'B' + 'B'.
    const COLLIDING_A: &str = "https://x.io/Aa";
    const COLLIDING_B: &str = "https://x.io/BB";

    #[tokio::test]
    async fn test_hash_collision_in_cache_returns_other_urls_mapping() {
        use crate::infrastructure::cache::keys::url_hash;
        assert_eq!(url_hash(COLLIDING_A), url_hash(COLLIDING_B));

        let h = harness();
        let first = h.service.create(COLLIDING_A, None).await.unwrap();
        assert!(first.is_created());

        let second = h.service.create(COLLIDING_B, None).await.unwrap();

        // The hashed index is consulted before the exact-match store lookup.
        assert!(!second.is_created());
        assert_eq!(second.mapping().short_code, first.mapping().short_code);
        assert_eq!(second.mapping().original_url, COLLIDING_A);
        assert_eq!(h.repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_hash_collision_without_cache_creates_separate_mappings() {
        let repo = Arc::new(InMemoryUrlRepository::new());
        let service = ShortenerService::new(
            repo.clone(),
            Arc::new(NullCache::new()),
            Arc::new(DeferredSpawner::new()),
        );

        let first = service.create(COLLIDING_A, None).await.unwrap();
        let second = service.create(COLLIDING_B, None).await.unwrap();

        assert!(first.is_created());
        assert!(second.is_created());
        assert_ne!(first.mapping().short_code, second.mapping().short_code);
        assert_eq!(second.mapping().original_url, COLLIDING_B);
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn test_health_reports() {
        assert_eq!(
            HealthReport::from_checks(true, true).status,
            HealthStatus::Healthy
        );
        assert_eq!(
            HealthReport::from_checks(true, false).status,
            HealthStatus::Degraded
        );
        assert_eq!(
            HealthReport::from_checks(false, true).status,
            HealthStatus::Unhealthy
        );
        assert_eq!(
            HealthReport::from_checks(false, false).status,
            HealthStatus::Unhealthy
        );
    }

    #[tokio::test]
    async fn test_health_unhealthy_when_store_down() {
        let h = harness();
        h.repo.set_available(false);

        let report = h.service.health().await;

        assert_eq!(report.status, HealthStatus::Unhealthy);
        assert!(!report.database_healthy);
        assert!(report.cache_healthy);
    }

    #[test]
    fn test_default_cache_policy() {
        let policy = CachePolicy::default();
        assert_eq!(policy.mapping_ttl, Duration::from_secs(86_400));
        assert_eq!(policy.stats_ttl, Duration::from_secs(300));
    }
}

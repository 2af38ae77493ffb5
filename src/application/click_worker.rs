//! Background click accounting.
//!
//! Runs after a redirect has already been answered. Every failure is logged
//! and swallowed; nothing here can affect the response the visitor received.

use std::time::Duration;

use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::UrlRepository;
use crate::infrastructure::cache::CacheService;

/// Retries after the first failed store update.
const STORE_UPDATE_RETRIES: usize = 2;

/// Records one click.
///
/// 1. Increments the cache click counter, refreshing its TTL to `counter_ttl`.
/// 2. Persists `prior_click_count + 1` to the durable store, retrying briefly
///    with exponential backoff.
/// 3. Invalidates the mapping, stats and counter entries for the code, even
///    if step 2 gave up, so the next read goes back to the store.
pub async fn track_click(
    cache: &dyn CacheService,
    repository: &dyn UrlRepository,
    counter_ttl: Duration,
    event: ClickEvent,
) {
    cache.increment_clicks(&event.short_code, counter_ttl).await;

    let click_count = event.next_click_count();
    let strategy = ExponentialBackoff::from_millis(2)
        .factor(25)
        .map(jitter)
        .take(STORE_UPDATE_RETRIES);

    let result = Retry::start(strategy, || {
        repository.update_click_count(event.mapping_id, click_count)
    })
    .await;

    match result {
        Ok(()) => {
            metrics::counter!("clicks_tracked_total").increment(1);
            debug!(
                "Click recorded for {} (click_count={})",
                event.short_code, click_count
            );
        }
        Err(e) => {
            metrics::counter!("click_tracking_failures_total").increment(1);
            warn!(
                "Failed to persist click for {} after {} attempts: {}",
                event.short_code,
                STORE_UPDATE_RETRIES + 1,
                e
            );
        }
    }

    cache.invalidate(&event.short_code).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::UrlMapping;
    use crate::domain::repositories::MockUrlRepository;
    use crate::error::AppError;
    use crate::infrastructure::cache::InMemoryCache;
    use chrono::Utc;
    use serde_json::json;

    const TTL: Duration = Duration::from_secs(86_400);

    fn cached_mapping() -> UrlMapping {
        let now = Utc::now();
        UrlMapping {
            id: 7,
            original_url: "https://example.com".to_string(),
            short_code: "abc123".to_string(),
            click_count: 4,
            expires_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_track_click_persists_prior_plus_one_and_invalidates() {
        let cache = InMemoryCache::new();
        let mapping = cached_mapping();
        cache.put_mapping("abc123", &mapping, TTL).await;
        cache.put_stats("abc123", &mapping.to_stats(4), TTL).await;

        let mut repo = MockUrlRepository::new();
        repo.expect_update_click_count()
            .withf(|id, count| *id == 7 && *count == 5)
            .times(1)
            .returning(|_, _| Ok(()));

        track_click(&cache, &repo, TTL, ClickEvent::new(7, "abc123", 4)).await;

        assert!(cache.get_mapping("abc123").await.is_none());
        assert!(cache.get_stats("abc123").await.is_none());
        assert!(cache.get_clicks("abc123").await.is_none());
    }

    #[tokio::test]
    async fn test_track_click_retries_store_update() {
        let cache = InMemoryCache::new();
        let mut repo = MockUrlRepository::new();
        let mut seq = mockall::Sequence::new();

        repo.expect_update_click_count()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(AppError::internal("Database error", json!({}))));
        repo.expect_update_click_count()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        track_click(&cache, &repo, TTL, ClickEvent::new(7, "abc123", 0)).await;
    }

    #[tokio::test]
    async fn test_track_click_swallows_persistent_failure_and_still_invalidates() {
        let cache = InMemoryCache::new();
        cache.put_mapping("abc123", &cached_mapping(), TTL).await;

        let mut repo = MockUrlRepository::new();
        repo.expect_update_click_count()
            .times(STORE_UPDATE_RETRIES + 1)
            .returning(|_, _| Err(AppError::internal("Database error", json!({}))));

        track_click(&cache, &repo, TTL, ClickEvent::new(7, "abc123", 0)).await;

        assert!(cache.get_mapping("abc123").await.is_none());
    }
}

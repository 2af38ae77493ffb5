#![allow(dead_code)]

use axum_test::TestServer;
use chrono::TimeDelta;
use quicklink::api::routes::public_routes;
use quicklink::application::services::ShortenerService;
use quicklink::domain::clock::ManualClock;
use quicklink::infrastructure::cache::{CacheService, InMemoryCache, NullCache};
use quicklink::infrastructure::persistence::InMemoryUrlRepository;
use quicklink::infrastructure::tasks::DeferredSpawner;
use quicklink::state::AppState;
use serde_json::{Value, json};
use std::sync::Arc;

pub const BASE_URL: &str = "https://s.test";

/// A router wired to in-memory collaborators that tests can drive directly.
pub struct TestApp {
    pub server: TestServer,
    pub repo: Arc<InMemoryUrlRepository>,
    pub cache: Arc<dyn CacheService>,
    pub spawner: Arc<DeferredSpawner>,
    pub clock: Arc<ManualClock>,
}

impl TestApp {
    /// Cache available, `BASE_URL` configured.
    pub fn new() -> Self {
        let clock = Arc::new(ManualClock::default());
        let cache = Arc::new(InMemoryCache::with_clock(clock.clone()));
        Self::build(cache, clock, Some(BASE_URL.to_string()))
    }

    /// Cache unavailable for the whole run.
    pub fn degraded() -> Self {
        let clock = Arc::new(ManualClock::default());
        Self::build(
            Arc::new(NullCache::new()),
            clock,
            Some(BASE_URL.to_string()),
        )
    }

    /// No `BASE_URL`; short URLs are derived from request headers.
    pub fn without_base_url() -> Self {
        let clock = Arc::new(ManualClock::default());
        let cache = Arc::new(InMemoryCache::with_clock(clock.clone()));
        Self::build(cache, clock, None)
    }

    fn build(
        cache: Arc<dyn CacheService>,
        clock: Arc<ManualClock>,
        base_url: Option<String>,
    ) -> Self {
        let repo = Arc::new(InMemoryUrlRepository::with_clock(clock.clone()));
        let spawner = Arc::new(DeferredSpawner::new());

        let shortener = ShortenerService::new(repo.clone(), cache.clone(), spawner.clone())
            .with_clock(clock.clone());
        let state = AppState::new(Arc::new(shortener), base_url);

        let app = public_routes().with_state(state);
        let server = TestServer::new(app).unwrap();

        Self {
            server,
            repo,
            cache,
            spawner,
            clock,
        }
    }

    /// Creates a short URL through the API and returns the response body.
    pub async fn shorten(&self, url: &str) -> Value {
        self.server
            .post("/shorten")
            .json(&json!({ "url": url }))
            .await
            .json::<Value>()
    }

    /// Creates a short URL through the API and returns its code.
    pub async fn shorten_code(&self, url: &str) -> String {
        self.shorten(url).await["short_code"]
            .as_str()
            .unwrap()
            .to_string()
    }

    /// Runs all queued click-accounting tasks.
    pub async fn drain_clicks(&self) -> usize {
        self.spawner.run_pending().await
    }

    pub fn advance_days(&self, days: i64) {
        self.clock.advance(TimeDelta::days(days));
    }

    pub fn advance_minutes(&self, minutes: i64) {
        self.clock.advance(TimeDelta::minutes(minutes));
    }
}

//! Process-local implementation of the URL repository.

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use crate::domain::clock::{Clock, SystemClock};
use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

#[derive(Default)]
struct Tables {
    next_id: i64,
    by_code: HashMap<String, UrlMapping>,
}

/// In-memory repository with the same guarantees as the PostgreSQL one:
/// ids are never reused and short codes are unique.
///
/// [`Self::set_available`] simulates an outage: every call then fails with
/// [`AppError::Internal`] and [`UrlRepository::ping`] reports unhealthy.
pub struct InMemoryUrlRepository {
    tables: RwLock<Tables>,
    clock: Arc<dyn Clock>,
    available: AtomicBool,
}

impl InMemoryUrlRepository {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Timestamps (`created_at`, `updated_at`) are taken from `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            clock,
            available: AtomicBool::new(true),
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of stored mappings.
    pub async fn len(&self) -> usize {
        self.tables.read().await.by_code.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn ensure_available(&self) -> Result<(), AppError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(AppError::internal("Database error", json!({})))
        }
    }
}

impl Default for InMemoryUrlRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<UrlMapping>, AppError> {
        self.ensure_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .by_code
            .values()
            .filter(|mapping| mapping.original_url == original_url)
            .min_by_key(|mapping| mapping.id)
            .cloned())
    }

    async fn find_by_short_code(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError> {
        self.ensure_available()?;
        Ok(self.tables.read().await.by_code.get(short_code).cloned())
    }

    async fn insert(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError> {
        self.ensure_available()?;
        let mut tables = self.tables.write().await;

        if tables.by_code.contains_key(&new_mapping.short_code) {
            return Err(AppError::duplicate_code(new_mapping.short_code));
        }

        tables.next_id += 1;
        let now = self.clock.now();
        let mapping = UrlMapping {
            id: tables.next_id,
            original_url: new_mapping.original_url,
            short_code: new_mapping.short_code,
            click_count: 0,
            expires_at: new_mapping.expires_at,
            created_at: now,
            updated_at: now,
        };

        tables
            .by_code
            .insert(mapping.short_code.clone(), mapping.clone());

        Ok(mapping)
    }

    async fn update_click_count(&self, id: i64, click_count: i64) -> Result<(), AppError> {
        self.ensure_available()?;
        let now = self.clock.now();
        let mut tables = self.tables.write().await;

        if let Some(mapping) = tables.by_code.values_mut().find(|mapping| mapping.id == id) {
            mapping.click_count = click_count;
            mapping.updated_at = now;
        }

        Ok(())
    }

    async fn ping(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }
}

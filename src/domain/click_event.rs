//! Click event model for asynchronous click tracking.

/// A click captured by the redirect path for background accounting.
///
/// Carries the click count that the redirect observed, so the background job
/// writes `prior_click_count + 1` without re-reading the store. Concurrent
/// redirects of the same code can therefore undercount.
///
/// # Usage Flow
///
/// 1. Created in [`crate::application::services::ShortenerService::redirect`]
/// 2. Moved into a task handed to a [`crate::domain::task_spawner::TaskSpawner`]
/// 3. Processed by [`crate::application::click_worker::track_click`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub mapping_id: i64,
    pub short_code: String,
    pub prior_click_count: i64,
}

impl ClickEvent {
    pub fn new(mapping_id: i64, short_code: impl Into<String>, prior_click_count: i64) -> Self {
        Self {
            mapping_id,
            short_code: short_code.into(),
            prior_click_count,
        }
    }

    /// The click count to persist for this event.
    pub fn next_click_count(&self) -> i64 {
        self.prior_click_count.saturating_add(1)
    }
}

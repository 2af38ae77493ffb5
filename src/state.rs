//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::ShortenerService;

#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<ShortenerService>,
    /// Public prefix for short URLs; derived from the request when `None`.
    pub base_url: Option<String>,
}

impl AppState {
    pub fn new(shortener: Arc<ShortenerService>, base_url: Option<String>) -> Self {
        Self {
            shortener,
            base_url,
        }
    }
}

//! DTOs for link shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::UrlMapping;

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL. Scheme and host are checked by the service.
    #[validate(length(min = 1, max = 2048, message = "URL must be 1-2048 characters"))]
    pub url: String,

    /// Lifetime in days. Zero or negative values mean the link never expires.
    #[validate(range(max = 36500, message = "expires_in must be at most 36500 days"))]
    pub expires_in: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_url: String,
    pub original_url: String,
    pub short_code: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl ShortenResponse {
    pub fn new(mapping: UrlMapping, short_url: String) -> Self {
        Self {
            short_url,
            original_url: mapping.original_url,
            short_code: mapping.short_code,
            expires_at: mapping.expires_at,
        }
    }
}

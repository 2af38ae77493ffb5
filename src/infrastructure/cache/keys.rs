//! Cache key layout shared by every cache backend.
//!
//! ```text
//! url:mapping:{short_code}     -> UrlMapping (JSON)
//! url:original:{url_hash}      -> short code
//! url:stats:{short_code}       -> StatsSnapshot (JSON)
//! url:clicks:{short_code}      -> integer counter
//! ```

use std::fmt;

const KEY_PREFIX: &str = "url";

/// A typed cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Mapping(String),
    OriginalUrl(String),
    Stats(String),
    Clicks(String),
}

impl CacheKey {
    pub fn mapping(short_code: &str) -> Self {
        Self::Mapping(short_code.to_string())
    }

    /// Keyed by [`url_hash`] of the URL, not the URL itself.
    pub fn original_url(original_url: &str) -> Self {
        Self::OriginalUrl(url_hash(original_url))
    }

    pub fn stats(short_code: &str) -> Self {
        Self::Stats(short_code.to_string())
    }

    pub fn clicks(short_code: &str) -> Self {
        Self::Clicks(short_code.to_string())
    }

    /// All per-code keys dropped together on invalidation.
    pub fn per_code(short_code: &str) -> [Self; 3] {
        [
            Self::mapping(short_code),
            Self::stats(short_code),
            Self::clicks(short_code),
        ]
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mapping(code) => write!(f, "{KEY_PREFIX}:mapping:{code}"),
            Self::OriginalUrl(hash) => write!(f, "{KEY_PREFIX}:original:{hash}"),
            Self::Stats(code) => write!(f, "{KEY_PREFIX}:stats:{code}"),
            Self::Clicks(code) => write!(f, "{KEY_PREFIX}:clicks:{code}"),
        }
    }
}

/// 32-bit multiplicative string hash (`h = h * 31 + c` over Unicode scalar
/// values), rendered as lowercase hex.
///
/// Stable across processes and releases. Collisions are tolerated: the create
/// path only uses it to short-circuit before the exact-match store lookup.
pub fn url_hash(input: &str) -> String {
    let hash = input
        .chars()
        .fold(0u32, |hash, c| hash.wrapping_mul(31).wrapping_add(c as u32));
    format!("{hash:x}")
}

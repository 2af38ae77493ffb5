//! Caching layer in front of the durable store.
//!
//! Provides a [`CacheService`] trait with three implementations:
//! - [`RedisCache`] - Production Redis-backed cache
//! - [`InMemoryCache`] - Process-local cache with the same TTL semantics
//! - [`NullCache`] - Degraded mode when Redis is unavailable
//!
//! Key layout and URL hashing live in [`keys`].

pub mod keys;
mod memory_cache;
mod null_cache;
mod redis_cache;
mod service;

pub use keys::{CacheKey, url_hash};
pub use memory_cache::InMemoryCache;
pub use null_cache::NullCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, CacheService};

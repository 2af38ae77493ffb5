//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for data persistence, caching and background work.
//!
//! # Modules
//!
//! - [`cache`] - Cache backends (Redis, in-memory and degraded no-op)
//! - [`persistence`] - Durable store implementations
//! - [`tasks`] - Background task spawners

pub mod cache;
pub mod persistence;
pub mod tasks;

//! Domain layer containing business entities and contracts.
//!
//! Nothing in here depends on infrastructure or presentation layers.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Durable store trait definitions
//! - [`click_event`] - Click accounting event model
//! - [`clock`] - Time source used for expiry decisions
//! - [`task_spawner`] - Fire-and-forget execution of background work
//!
//! # Click Processing Flow
//!
//! 1. HTTP handler resolves a redirect through the service
//! 2. A [`click_event::ClickEvent`] is captured from the mapping that was served
//! 3. The event is handed to a [`task_spawner::TaskSpawner`] and the response goes out
//! 4. [`crate::application::click_worker::track_click`] updates the cache counter and the store

pub mod click_event;
pub mod clock;
pub mod entities;
pub mod repositories;
pub mod task_spawner;

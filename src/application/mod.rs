//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository and
//! cache calls, validation, and business rules. Services consume trait objects
//! and provide a clean API for HTTP handlers.
//!
//! # Contents
//!
//! - [`services::ShortenerService`] - Create, redirect, stats and health
//! - [`click_worker::track_click`] - Background click accounting run after each redirect

pub mod click_worker;
pub mod services;

//! Core domain entities.
//!
//! - [`UrlMapping`] - A stored short code to URL mapping
//! - [`NewUrlMapping`] - Insert payload for a mapping
//! - [`StatsSnapshot`] - Public statistics view of a mapping

pub mod url_mapping;

pub use url_mapping::{NewUrlMapping, StatsSnapshot, UrlMapping};

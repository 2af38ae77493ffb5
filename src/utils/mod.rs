//! Utility functions for code generation, URL handling and error classification.
//!
//! - [`code_generator`] - Short code generation
//! - [`url_validator`] - Original-URL validation
//! - [`short_url`] - Public short URL construction
//! - [`db_error`] - Database error classification

pub mod code_generator;
pub mod db_error;
pub mod short_url;
pub mod url_validator;

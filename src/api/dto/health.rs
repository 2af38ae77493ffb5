//! DTOs for health check endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::services::{HealthReport, HealthStatus};

/// Health check response with component status.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub service: &'static str,
    pub version: &'static str,
    pub timestamp: DateTime<Utc>,
    pub database: ComponentHealth,
    pub cache: ComponentHealth,
}

/// Individual component health status.
#[derive(Debug, Serialize)]
pub struct ComponentHealth {
    pub healthy: bool,
}

impl HealthResponse {
    pub fn from_report(report: HealthReport, timestamp: DateTime<Utc>) -> Self {
        Self {
            status: report.status,
            service: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            timestamp,
            database: ComponentHealth {
                healthy: report.database_healthy,
            },
            cache: ComponentHealth {
                healthy: report.cache_healthy,
            },
        }
    }
}

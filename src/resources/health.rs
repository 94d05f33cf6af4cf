//! Service health checks (`GET /api/v1/health`, `GET /api/v1/auth/health`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Health report of a service.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct HealthStatus {
    /// Whether the check succeeded.
    pub success: bool,
    /// Status string, `healthy` when up.
    pub status: String,
    /// Server time of the check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Service name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    /// Service version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl HealthStatus {
    /// Returns `true` if the service reports itself healthy.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.success && self.status == "healthy"
    }
}

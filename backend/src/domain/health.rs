//! Process health reporting.
//!
//! The report aggregates named sub-checks. Any failing check makes the whole
//! report unhealthy; there is no degraded state.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::domain::ports::ConnectivityProbe;

/// Version reported by the health endpoint.
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Healthy or not. Serialised in lower case by the HTTP adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

impl HealthStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Unhealthy => "unhealthy",
        }
    }

    pub fn is_healthy(self) -> bool {
        matches!(self, Self::Healthy)
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one sub-check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentHealth {
    pub status: HealthStatus,
    pub error: Option<String>,
}

impl ComponentHealth {
    pub fn healthy() -> Self {
        Self {
            status: HealthStatus::Healthy,
            error: None,
        }
    }
}

/// Snapshot returned by [`HealthService::check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
    pub version: &'static str,
    pub uptime: Duration,
    pub database: ComponentHealth,
    /// Static placeholder; the process has no memory probe.
    pub memory: ComponentHealth,
}

/// Pings the store and reports uptime since construction.
#[derive(Clone)]
pub struct HealthService {
    probe: Arc<dyn ConnectivityProbe>,
    started: Instant,
}

impl HealthService {
    pub fn new(probe: Arc<dyn ConnectivityProbe>) -> Self {
        Self {
            probe,
            started: Instant::now(),
        }
    }

    /// Run every sub-check and fold them into one report.
    pub async fn check(&self) -> HealthReport {
        let database = match self.probe.ping().await {
            Ok(()) => ComponentHealth::healthy(),
            Err(err) => {
                warn!(error = %err, "database health check failed");
                ComponentHealth {
                    status: HealthStatus::Unhealthy,
                    error: Some(err.to_string()),
                }
            }
        };

        let memory = ComponentHealth::healthy();
        let status = if database.status.is_healthy() && memory.status.is_healthy() {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        };

        HealthReport {
            status,
            timestamp: Utc::now(),
            version: SERVICE_VERSION,
            uptime: self.started.elapsed(),
            database,
            memory,
        }
    }
}

/// Render a duration compactly: `4.250s` below a minute, `2m5s` or `1h2m3s`
/// above it.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use users_api::domain::format_uptime;
///
/// assert_eq!(format_uptime(Duration::from_millis(4_250)), "4.250s");
/// assert_eq!(format_uptime(Duration::from_secs(3_723)), "1h2m3s");
/// ```
pub fn format_uptime(uptime: Duration) -> String {
    let total = uptime.as_secs();
    if total < 60 {
        return format!("{}.{:03}s", total, uptime.subsec_millis());
    }
    let hours = total / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;
    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}s")
    } else {
        format!("{minutes}m{seconds}s")
    }
}

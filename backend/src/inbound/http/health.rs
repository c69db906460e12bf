//! Health endpoint.
//!
//! Unlike the users routes this response is not wrapped in the success
//! envelope; load balancers read `status` directly.

use actix_web::{HttpResponse, get, http::StatusCode, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ComponentHealth, HealthReport, format_uptime};
use crate::inbound::http::state::HttpState;

/// Status of one sub-check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CheckResponse {
    #[schema(example = "healthy")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<ComponentHealth> for CheckResponse {
    fn from(value: ComponentHealth) -> Self {
        Self {
            status: value.status.as_str().to_owned(),
            error: value.error,
        }
    }
}

/// Named sub-checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthChecks {
    pub database: CheckResponse,
    pub memory: CheckResponse,
}

/// Body of `GET /api/v1/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
    pub timestamp: DateTime<Utc>,
    #[schema(example = "0.1.0")]
    pub version: String,
    #[schema(example = "1h2m3s")]
    pub uptime: String,
    pub checks: HealthChecks,
}

impl From<HealthReport> for HealthResponse {
    fn from(report: HealthReport) -> Self {
        Self {
            status: report.status.as_str().to_owned(),
            timestamp: report.timestamp,
            version: report.version.to_owned(),
            uptime: format_uptime(report.uptime),
            checks: HealthChecks {
                database: report.database.into(),
                memory: report.memory.into(),
            },
        }
    }
}

/// Report process and store health.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Healthy", body = HealthResponse),
        (status = 503, description = "A dependency is unhealthy", body = HealthResponse)
    ),
    tags = ["health"],
    operation_id = "health",
    security([])
)]
#[get("/health")]
pub async fn health(state: web::Data<HttpState>) -> HttpResponse {
    let report = state.health.check().await;
    let status = if report.status.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    HttpResponse::build(status).json(HealthResponse::from(report))
}

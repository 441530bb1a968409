use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use super::SERVICE_NAME;

/// Health check response body
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
    pub service: &'static str,
    pub version: &'static str,
}

/// Health check endpoint
#[tracing::instrument]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
    })
}

use axum::Json;
use serde::Serialize;

use super::SERVICE_NAME;

/// Root informational response body
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: Endpoints,
}

/// Entry points advertised to API consumers
#[derive(Debug, Serialize)]
pub struct Endpoints {
    pub health: &'static str,
    pub api: &'static str,
}

/// Index endpoint with API information and entry points
#[tracing::instrument]
pub async fn index() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        endpoints: Endpoints {
            health: "/health",
            api: "/api/v1",
        },
    })
}

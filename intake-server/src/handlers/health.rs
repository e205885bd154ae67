use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::server::IntakeServer;

#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub uptime_secs: u64,
    pub total_records: usize,
    pub vendor_configured: bool,
}

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Call intake backend is running".to_string(),
    })
}

pub async fn health_check(State(server): State<IntakeServer>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: server.uptime_secs(),
        total_records: server.calls.list_all().await.len(),
        vendor_configured: server.vendor.is_configured(),
    })
}

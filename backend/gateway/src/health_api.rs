//! Gateway Health API
//!
//! Liveness at `/` and a richer report at `/api/health`.

use aegis_understanding::engine_version;
use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::GatewayState;

pub const SERVICE_NAME: &str = "UnivAegis-Backend";

#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub status: &'static str,
    pub service: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
    /// Engine version banner; `None` until the first successful probe.
    pub ocr_engine: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Handler for `GET /`
pub async fn service_status() -> Json<ServiceStatus> {
    Json(ServiceStatus {
        status: "active",
        service: SERVICE_NAME,
    })
}

/// Handler for `GET /api/health`
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.uptime_seconds(),
        ocr_engine: engine_version().map(str::to_string),
        timestamp: Utc::now(),
    })
}

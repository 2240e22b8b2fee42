//! Ping / Health Handlers

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::infrastructure::http::state::AppState;

/// Ping 响应
#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Ping endpoint - 存活检查
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Health 响应
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub engine: bool,
    pub uptime_secs: u64,
    pub version: &'static str,
}

/// Health endpoint - 就绪检查，探测引擎可用性
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let engine_ok = state.engine.health_check().await;

    Json(HealthResponse {
        status: if engine_ok { "healthy" } else { "degraded" },
        engine: engine_ok,
        uptime_secs: state.started_at.elapsed().as_secs(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

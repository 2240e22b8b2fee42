//! HTTP Routes
//!
//! API Endpoints:
//! - /api/process   POST  提交合成请求（文本 + 参考音频）
//! - /api/ping      GET   存活检查
//! - /api/health    GET   就绪检查（含引擎探测）

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/health", get(handlers::health))
        .route("/process", post(handlers::process_content))
}

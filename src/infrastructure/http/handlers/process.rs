//! ProcessContent Handler - RPC 端点
//!
//! 任何处理结果（包括失败）都作为正常的 ProcessingResponse 返回，
//! 不向传输层暴露错误。

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::ProcessContentCommand;
use crate::infrastructure::http::dto::{ProcessingResponse, SynthesisRequest};
use crate::infrastructure::http::state::AppState;

/// 提交一次合成请求
pub async fn process_content(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SynthesisRequest>,
) -> Json<ProcessingResponse> {
    // 工作池许可：超出上限的请求在此排队
    let _permit = match state.worker_permits.acquire().await {
        Ok(permit) => permit,
        Err(_) => {
            return Json(ProcessingResponse::error("server is shutting down"));
        }
    };

    let cmd = ProcessContentCommand {
        text: req.text,
        reference_audio: req.audio,
    };

    let outcome = state.process_handler.handle(cmd).await;

    Json(ProcessingResponse::from_outcome(outcome))
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use std::path::Path;
    use std::sync::Arc;
    use tempfile::tempdir;
    use tower::ServiceExt;

    use crate::application::{
        ProcessContentHandler, SerializedEngine, SynthesisEnginePort,
    };
    use crate::config::SynthesisConfig;
    use crate::infrastructure::adapters::{
        FakeSynthesisEngine, FakeSynthesisEngineConfig, FsScratchStore, SymphoniaWavProbe,
    };
    use crate::infrastructure::http::dto::ProcessingResponse;
    use crate::infrastructure::http::{create_routes, AppState};
    use crate::test_util::wav_fixture;

    async fn test_router(scratch_dir: &Path) -> axum::Router {
        let scratch = Arc::new(FsScratchStore::new(scratch_dir).await.unwrap());
        let fake = Arc::new(FakeSynthesisEngine::new(FakeSynthesisEngineConfig {
            delay_ms: 2,
            ..Default::default()
        }));
        let engine: Arc<SerializedEngine> = Arc::new(SerializedEngine::new(fake, 1));
        let engine_port: Arc<dyn SynthesisEnginePort> = engine;

        let handler = ProcessContentHandler::new(
            scratch,
            engine_port.clone(),
            Arc::new(SymphoniaWavProbe::new()),
            SynthesisConfig::default(),
        );

        let state = AppState::new(handler, engine_port, 4);
        create_routes().with_state(Arc::new(state))
    }

    async fn post_process(router: axum::Router, body: serde_json::Value) -> ProcessingResponse {
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/process")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_valid_request_returns_ok_with_audio() {
        let dir = tempdir().unwrap();
        let router = test_router(dir.path()).await;

        let input = wav_fixture(256, 11);
        let resp = post_process(
            router,
            serde_json::json!({
                "text": "Привет, мир",
                "audio": STANDARD.encode(&input),
            }),
        )
        .await;

        assert_eq!(resp.status, "OK");
        assert_eq!(resp.result.processed_audio, input);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_empty_request_returns_error_status() {
        let dir = tempdir().unwrap();
        let router = test_router(dir.path()).await;

        let resp = post_process(
            router,
            serde_json::json!({"text": "", "audio": ""}),
        )
        .await;

        assert!(resp.status.starts_with("ERROR:"));
        assert!(resp.result.processed_audio.is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_malformed_audio_returns_error_status() {
        let dir = tempdir().unwrap();
        let router = test_router(dir.path()).await;

        let resp = post_process(
            router,
            serde_json::json!({
                "text": "hello",
                "audio": STANDARD.encode(b"this is not a waveform at all"),
            }),
        )
        .await;

        assert!(resp.status.starts_with("ERROR:"));
        assert!(resp.result.processed_audio.is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_ping_endpoint() {
        let dir = tempdir().unwrap();
        let router = test_router(dir.path()).await;

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/ping")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_endpoint_reports_engine() {
        let dir = tempdir().unwrap();
        let router = test_router(dir.path()).await;

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let health: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(health["status"], "healthy");
        assert_eq!(health["engine"], true);
    }
}

//! Revoice - 声音克隆语音合成服务
//!
//! 启动流程：加载配置 → 初始化日志 → 构建引擎句柄（一次）→
//! 组装请求处理器 → 启动 HTTP 服务器（优雅关闭）

use std::sync::Arc;

use revoice::application::{ProcessContentHandler, SerializedEngine, SynthesisEnginePort};
use revoice::config::{load_config, print_config, EngineBackend};
use revoice::infrastructure::adapters::{
    FakeSynthesisEngine, FakeSynthesisEngineConfig, FsScratchStore, HttpSynthesisEngine,
    HttpSynthesisEngineConfig, SymphoniaWavProbe,
};
use revoice::infrastructure::http::{AppState, HttpServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},revoice={},tower_http=debug",
        config.log.level, config.log.level
    );
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));
    if config.log.json {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    tracing::info!("Revoice - 声音克隆语音合成服务");
    print_config(&config);

    // 确保临时工件目录存在
    tokio::fs::create_dir_all(&config.scratch.dir).await?;

    // 默认参考音色必须在启动时就绪
    if let Some(path) = &config.synthesis.default_voice_ref {
        if !path.exists() {
            anyhow::bail!("Default voice reference not found: {}", path.display());
        }
    }

    // 创建临时工件存储
    let scratch = Arc::new(
        FsScratchStore::new(&config.scratch.dir)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to init scratch store: {}", e))?,
    );

    // 创建合成引擎句柄（进程内构建一次，跨请求复用）
    let raw_engine: Arc<dyn SynthesisEnginePort> = match config.engine.backend {
        EngineBackend::Http => {
            let engine_config = HttpSynthesisEngineConfig {
                base_url: config.engine.url.clone(),
                timeout_secs: config.engine.timeout_secs,
            };
            Arc::new(
                HttpSynthesisEngine::new(engine_config)
                    .map_err(|e| anyhow::anyhow!("Failed to create engine client: {}", e))?,
            )
        }
        EngineBackend::Fake => Arc::new(FakeSynthesisEngine::new(FakeSynthesisEngineConfig {
            sample_path: config.engine.fake_sample.clone(),
            delay_ms: 200,
        })),
    };

    // 串行化包装：同一句柄上的并发推理受 engine.max_concurrent 限制
    let engine: Arc<dyn SynthesisEnginePort> = Arc::new(SerializedEngine::new(
        raw_engine,
        config.engine.max_concurrent,
    ));

    if !engine.health_check().await {
        tracing::warn!("Synthesis engine health check failed at startup");
    }

    // 创建请求处理器
    let handler = ProcessContentHandler::new(
        scratch,
        engine.clone(),
        Arc::new(SymphoniaWavProbe::new()),
        config.synthesis.clone(),
    );

    let state = AppState::new(handler, engine, config.server.max_workers);
    let server = HttpServer::new(config.server.clone(), state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

//! Synthesis Engine Port - 合成引擎抽象
//!
//! 定义声音克隆推理的抽象接口，具体实现在 infrastructure/adapters 层。
//! 引擎句柄进程内只加载一次，跨请求复用。

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;

/// 引擎错误
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Inference timeout")]
    Timeout,

    #[error("Engine failure: {0}")]
    EngineFailure(String),

    #[error("Invalid engine output: {0}")]
    InvalidOutput(String),
}

/// 一次合成调用
///
/// 文本 + 目标语言 + 参考音色样本路径 + 输出工件路径。
/// 两个路径均归属于发起请求的 ScratchLease。
#[derive(Debug, Clone)]
pub struct SynthesisJob {
    /// 要合成的文本
    pub text: String,
    /// 合成目标语言代码
    pub language: String,
    /// 参考音色样本（已暂存到磁盘）
    pub speaker_wav: PathBuf,
    /// 合成结果写入位置
    pub output_path: PathBuf,
}

/// Synthesis Engine Port
///
/// 外部声音克隆引擎的抽象接口
#[async_trait]
pub trait SynthesisEnginePort: Send + Sync {
    /// 执行一次合成
    ///
    /// 读取 `speaker_wav`，将合成音频写入 `output_path`。
    /// 调用阻塞至推理完成，中途不让出。
    async fn synthesize(&self, job: SynthesisJob) -> Result<(), EngineError>;

    /// 检查引擎是否可用
    async fn health_check(&self) -> bool {
        true // 默认实现
    }
}

/// 串行化引擎句柄
///
/// 推理引擎对同一句柄的并发调用一般不可重入，必须在适配器侧
/// 声明并发上限。许可数 `max_concurrent`（默认 1）即为实际的
/// 合成吞吐上限，低于工作池大小；工件 I/O 不受此限制。
pub struct SerializedEngine {
    inner: Arc<dyn SynthesisEnginePort>,
    permits: Semaphore,
}

impl SerializedEngine {
    /// 包装引擎句柄，许可数至少为 1
    pub fn new(inner: Arc<dyn SynthesisEnginePort>, max_concurrent: usize) -> Self {
        Self {
            inner,
            permits: Semaphore::new(max_concurrent.max(1)),
        }
    }
}

#[async_trait]
impl SynthesisEnginePort for SerializedEngine {
    async fn synthesize(&self, job: SynthesisJob) -> Result<(), EngineError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| EngineError::EngineFailure("engine handle closed".to_string()))?;

        self.inner.synthesize(job).await
    }

    async fn health_check(&self) -> bool {
        self.inner.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// 记录并发度的测试引擎
    struct RecordingEngine {
        active: AtomicUsize,
        max_seen: AtomicUsize,
    }

    impl RecordingEngine {
        fn new() -> Self {
            Self {
                active: AtomicUsize::new(0),
                max_seen: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl SynthesisEnginePort for RecordingEngine {
        async fn synthesize(&self, _job: SynthesisJob) -> Result<(), EngineError> {
            let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_seen.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(30)).await;
            self.active.fetch_sub(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn dummy_job() -> SynthesisJob {
        SynthesisJob {
            text: "hello".to_string(),
            language: "ru".to_string(),
            speaker_wav: PathBuf::from("/dev/null"),
            output_path: PathBuf::from("/dev/null"),
        }
    }

    #[tokio::test]
    async fn test_serialized_engine_caps_concurrency() {
        let recording = Arc::new(RecordingEngine::new());
        let engine = Arc::new(SerializedEngine::new(recording.clone(), 1));

        let mut handles = Vec::new();
        for _ in 0..4 {
            let engine = engine.clone();
            handles.push(tokio::spawn(
                async move { engine.synthesize(dummy_job()).await },
            ));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(recording.max_seen.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_zero_permits_clamped_to_one() {
        let recording = Arc::new(RecordingEngine::new());
        let engine = SerializedEngine::new(recording, 0);
        assert!(engine.synthesize(dummy_job()).await.is_ok());
    }
}

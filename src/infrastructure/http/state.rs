//! Application State

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;

use crate::application::{ProcessContentHandler, SynthesisEnginePort};

/// 应用状态
///
/// 引擎句柄与处理器在启动时构建一次，之后只读共享
pub struct AppState {
    /// ProcessContent 处理器
    pub process_handler: ProcessContentHandler,
    /// 引擎句柄（健康检查用）
    pub engine: Arc<dyn SynthesisEnginePort>,
    /// 工作池许可：并发处理的请求上限
    pub worker_permits: Arc<Semaphore>,
    /// 进程启动时间
    pub started_at: Instant,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        process_handler: ProcessContentHandler,
        engine: Arc<dyn SynthesisEnginePort>,
        max_workers: usize,
    ) -> Self {
        Self {
            process_handler,
            engine,
            worker_permits: Arc::new(Semaphore::new(max_workers.max(1))),
            started_at: Instant::now(),
        }
    }
}

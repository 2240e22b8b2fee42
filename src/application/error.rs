//! 应用层错误定义
//!
//! 处理管线内部的错误分类。上线时统一折叠为 "ERROR: <message>" 状态串，
//! 分类标签仅用于日志与测试断言。

use thiserror::Error;

use crate::application::ports::{EngineError, ScratchError, WaveformError};

/// 请求处理错误
#[derive(Debug, Error)]
pub enum ProcessError {
    /// 输入校验错误（空文本、空音频、不可解码的参考波形）
    #[error("Validation error: {0}")]
    Validation(String),

    /// 临时工件读写错误
    #[error("Resource error: {0}")]
    Resource(String),

    /// 合成引擎错误
    #[error("Engine error: {0}")]
    Engine(String),
}

impl ProcessError {
    /// 创建校验错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// 创建资源错误
    pub fn resource(message: impl Into<String>) -> Self {
        Self::Resource(message.into())
    }

    /// 创建引擎错误
    pub fn engine(message: impl Into<String>) -> Self {
        Self::Engine(message.into())
    }

    /// 错误分类标签（日志/测试用）
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Resource(_) => "resource",
            Self::Engine(_) => "engine",
        }
    }
}

impl From<ScratchError> for ProcessError {
    fn from(err: ScratchError) -> Self {
        Self::Resource(err.to_string())
    }
}

impl From<EngineError> for ProcessError {
    fn from(err: EngineError) -> Self {
        Self::Engine(err.to_string())
    }
}

impl From<WaveformError> for ProcessError {
    fn from(err: WaveformError) -> Self {
        Self::Validation(err.to_string())
    }
}

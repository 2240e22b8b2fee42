//! Revoice - 声音克隆语音合成服务
//!
//! 单一 RPC 端点：提交一段参考音频和一段文本，返回以该参考音色合成的语音。
//!
//! 应用层 (application/):
//! - Ports: 端口定义（SynthesisEngine、ScratchStore、WaveformProbe）
//! - ProcessContentHandler: 请求处理管线（校验 → 暂存 → 推理 → 回读 → 清理）
//! - error: 应用层错误分类
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RPC 端点 + 健康检查
//! - Adapters: HTTP/Fake 推理引擎、临时工件存储、波形探测

pub mod application;
pub mod config;
pub mod infrastructure;

pub use config::{load_config, AppConfig};

#[cfg(test)]
pub(crate) mod test_util;

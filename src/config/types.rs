//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 合成引擎配置
    #[serde(default)]
    pub engine: EngineConfig,

    /// 合成参数配置
    #[serde(default)]
    pub synthesis: SynthesisConfig,

    /// 临时工件配置
    #[serde(default)]
    pub scratch: ScratchConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            engine: EngineConfig::default(),
            synthesis: SynthesisConfig::default(),
            scratch: ScratchConfig::default(),
            log: LogConfig::default(),
        }
    }
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 并发处理的请求上限（工作池大小）
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    50051
}

fn default_max_workers() -> usize {
    10
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_workers: default_max_workers(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 合成引擎后端类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineBackend {
    /// 外部 HTTP 推理服务
    Http,
    /// 无引擎运行（回显参考音频，测试/联调用）
    Fake,
}

impl Default for EngineBackend {
    fn default() -> Self {
        EngineBackend::Http
    }
}

/// 合成引擎配置
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// 引擎后端
    #[serde(default)]
    pub backend: EngineBackend,

    /// 引擎服务基础 URL（backend = http 时使用）
    #[serde(default = "default_engine_url")]
    pub url: String,

    /// 单次推理超时时间（秒）
    #[serde(default = "default_engine_timeout")]
    pub timeout_secs: u64,

    /// 同一引擎句柄上允许的并发推理数
    /// 推理引擎一般不可重入，默认串行
    #[serde(default = "default_engine_concurrent")]
    pub max_concurrent: usize,

    /// Fake 后端的固定输出音频（未设置时回显参考音频）
    #[serde(default)]
    pub fake_sample: Option<PathBuf>,
}

fn default_engine_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_engine_timeout() -> u64 {
    120
}

fn default_engine_concurrent() -> usize {
    1
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            backend: EngineBackend::default(),
            url: default_engine_url(),
            timeout_secs: default_engine_timeout(),
            max_concurrent: default_engine_concurrent(),
            fake_sample: None,
        }
    }
}

/// 合成参数配置
///
/// 目标语言与默认参考音色在启动时固定，不随请求变化
#[derive(Debug, Clone, Deserialize)]
pub struct SynthesisConfig {
    /// 合成目标语言代码
    #[serde(default = "default_language")]
    pub language: String,

    /// 默认参考音色样本路径（请求未携带参考音频时使用）
    #[serde(default)]
    pub default_voice_ref: Option<PathBuf>,
}

fn default_language() -> String {
    "ru".to_string()
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            default_voice_ref: None,
        }
    }
}

/// 临时工件配置
#[derive(Debug, Clone, Deserialize)]
pub struct ScratchConfig {
    /// 每请求临时工件的根目录
    #[serde(default = "default_scratch_dir")]
    pub dir: PathBuf,
}

fn default_scratch_dir() -> PathBuf {
    PathBuf::from("data/scratch")
}

impl Default for ScratchConfig {
    fn default() -> Self {
        Self {
            dir: default_scratch_dir(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 50051);
        assert_eq!(config.server.max_workers, 10);
        assert_eq!(config.engine.backend, EngineBackend::Http);
        assert_eq!(config.engine.max_concurrent, 1);
        assert_eq!(config.synthesis.language, "ru");
        assert!(config.synthesis.default_voice_ref.is_none());
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:50051");
    }
}

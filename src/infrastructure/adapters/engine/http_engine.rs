//! HTTP Synthesis Engine - 调用外部推理服务
//!
//! 实现 SynthesisEnginePort trait，通过 HTTP 调用加载着声音克隆
//! 模型的外部引擎进程（模型与计算设备在该进程启动时选定）。
//!
//! 外部引擎 API:
//! POST {base_url}/api/synthesize
//! Request: multipart/form-data，字段 text、language、speaker_wav (文件)
//! Response: 合成音频的原始字节

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::time::Duration;
use tokio::fs;

use crate::application::ports::{EngineError, SynthesisEnginePort, SynthesisJob};

/// HTTP 引擎配置
#[derive(Debug, Clone)]
pub struct HttpSynthesisEngineConfig {
    /// 引擎服务基础 URL
    pub base_url: String,
    /// 单次推理超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpSynthesisEngineConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 120,
        }
    }
}

impl HttpSynthesisEngineConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP 合成引擎
///
/// Client 进程内构建一次，跨请求复用（引擎句柄）
pub struct HttpSynthesisEngine {
    client: Client,
    config: HttpSynthesisEngineConfig,
}

impl HttpSynthesisEngine {
    /// 创建新的 HTTP 引擎适配器
    pub fn new(config: HttpSynthesisEngineConfig) -> Result<Self, EngineError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EngineError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 获取推理 URL
    fn synthesize_url(&self) -> String {
        format!("{}/api/synthesize", self.config.base_url)
    }

    /// 获取健康检查 URL
    fn health_url(&self) -> String {
        format!("{}/health", self.config.base_url)
    }
}

#[async_trait]
impl SynthesisEnginePort for HttpSynthesisEngine {
    async fn synthesize(&self, job: SynthesisJob) -> Result<(), EngineError> {
        let speaker_bytes = fs::read(&job.speaker_wav)
            .await
            .map_err(|e| EngineError::EngineFailure(format!("speaker reference unreadable: {}", e)))?;

        let speaker_part = Part::bytes(speaker_bytes)
            .file_name("speaker.wav")
            .mime_str("audio/wav")
            .map_err(|e| EngineError::InvalidOutput(e.to_string()))?;

        let form = Form::new()
            .text("text", job.text.clone())
            .text("language", job.language.clone())
            .part("speaker_wav", speaker_part);

        tracing::debug!(
            url = %self.synthesize_url(),
            text_len = job.text.len(),
            language = %job.language,
            "Sending synthesis request to engine"
        );

        let response = self
            .client
            .post(self.synthesize_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EngineError::Timeout
                } else if e.is_connect() {
                    EngineError::NetworkError(format!("Cannot connect to engine: {}", e))
                } else {
                    EngineError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(EngineError::EngineFailure(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| EngineError::InvalidOutput(format!("Failed to read audio: {}", e)))?;

        if audio.is_empty() {
            return Err(EngineError::InvalidOutput(
                "engine returned empty audio".to_string(),
            ));
        }

        fs::write(&job.output_path, &audio)
            .await
            .map_err(|e| EngineError::EngineFailure(format!("failed to write output: {}", e)))?;

        tracing::info!(
            audio_size = audio.len(),
            output = %job.output_path.display(),
            "Engine synthesis completed"
        );

        Ok(())
    }

    async fn health_check(&self) -> bool {
        match self
            .client
            .get(self.health_url())
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = HttpSynthesisEngineConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout_secs, 120);
    }

    #[test]
    fn test_config_builder() {
        let config = HttpSynthesisEngineConfig::new("http://engine:9000").with_timeout(60);
        assert_eq!(config.base_url, "http://engine:9000");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_urls() {
        let engine =
            HttpSynthesisEngine::new(HttpSynthesisEngineConfig::new("http://engine:9000")).unwrap();
        assert_eq!(engine.synthesize_url(), "http://engine:9000/api/synthesize");
        assert_eq!(engine.health_url(), "http://engine:9000/health");
    }
}

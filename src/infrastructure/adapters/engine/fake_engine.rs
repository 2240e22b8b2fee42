//! Fake Synthesis Engine - 无引擎实现
//!
//! 不做真实推理：延迟一段时间后把参考样本（或配置的固定音频）
//! 写到输出工件。用于测试和无引擎联调。

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

use crate::application::ports::{EngineError, SynthesisEnginePort, SynthesisJob};

/// Fake 引擎配置
#[derive(Debug, Clone)]
pub struct FakeSynthesisEngineConfig {
    /// 固定输出的音频文件（None 时回显参考样本）
    pub sample_path: Option<PathBuf>,
    /// 模拟推理延迟（毫秒）
    pub delay_ms: u64,
}

impl Default for FakeSynthesisEngineConfig {
    fn default() -> Self {
        Self {
            sample_path: None,
            delay_ms: 0,
        }
    }
}

/// Fake 合成引擎
pub struct FakeSynthesisEngine {
    config: FakeSynthesisEngineConfig,
}

impl FakeSynthesisEngine {
    pub fn new(config: FakeSynthesisEngineConfig) -> Self {
        Self { config }
    }

    /// 使用默认配置创建
    pub fn with_defaults() -> Self {
        Self::new(FakeSynthesisEngineConfig::default())
    }
}

#[async_trait]
impl SynthesisEnginePort for FakeSynthesisEngine {
    async fn synthesize(&self, job: SynthesisJob) -> Result<(), EngineError> {
        tracing::debug!(
            text_len = job.text.len(),
            language = %job.language,
            speaker_wav = %job.speaker_wav.display(),
            "FakeSynthesisEngine: echoing reference audio"
        );

        if self.config.delay_ms > 0 {
            // 模拟推理延迟
            tokio::time::sleep(tokio::time::Duration::from_millis(self.config.delay_ms)).await;
        }

        let audio = match &self.config.sample_path {
            Some(path) => fs::read(path).await.map_err(|e| {
                EngineError::EngineFailure(format!("fixed sample unreadable: {}", e))
            })?,
            None => fs::read(&job.speaker_wav).await.map_err(|e| {
                EngineError::EngineFailure(format!("speaker reference unreadable: {}", e))
            })?,
        };

        fs::write(&job.output_path, &audio)
            .await
            .map_err(|e| EngineError::EngineFailure(format!("failed to write output: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_echoes_reference_audio() {
        let dir = tempdir().unwrap();
        let speaker = dir.path().join("ref.wav");
        let output = dir.path().join("out.wav");
        tokio::fs::write(&speaker, b"reference bytes").await.unwrap();

        let engine = FakeSynthesisEngine::with_defaults();
        engine
            .synthesize(SynthesisJob {
                text: "hi".to_string(),
                language: "ru".to_string(),
                speaker_wav: speaker,
                output_path: output.clone(),
            })
            .await
            .unwrap();

        assert_eq!(tokio::fs::read(&output).await.unwrap(), b"reference bytes");
    }

    #[tokio::test]
    async fn test_fixed_sample_overrides_echo() {
        let dir = tempdir().unwrap();
        let speaker = dir.path().join("ref.wav");
        let sample = dir.path().join("fixed.wav");
        let output = dir.path().join("out.wav");
        tokio::fs::write(&speaker, b"reference").await.unwrap();
        tokio::fs::write(&sample, b"fixed audio").await.unwrap();

        let engine = FakeSynthesisEngine::new(FakeSynthesisEngineConfig {
            sample_path: Some(sample),
            delay_ms: 0,
        });
        engine
            .synthesize(SynthesisJob {
                text: "hi".to_string(),
                language: "ru".to_string(),
                speaker_wav: speaker,
                output_path: output.clone(),
            })
            .await
            .unwrap();

        assert_eq!(tokio::fs::read(&output).await.unwrap(), b"fixed audio");
    }

    #[tokio::test]
    async fn test_missing_reference_is_engine_failure() {
        let dir = tempdir().unwrap();

        let engine = FakeSynthesisEngine::with_defaults();
        let err = engine
            .synthesize(SynthesisJob {
                text: "hi".to_string(),
                language: "ru".to_string(),
                speaker_wav: dir.path().join("nope.wav"),
                output_path: dir.path().join("out.wav"),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, EngineError::EngineFailure(_)));
    }
}

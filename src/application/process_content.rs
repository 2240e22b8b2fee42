//! ProcessContent Handler - 请求处理管线
//!
//! 编排一次合成调用：校验 → 暂存参考样本 → 推理 → 回读输出 → 释放工件。
//! 任何一步的失败都在此边界折叠为 ProcessError，不向传输层抛出。

use std::sync::Arc;

use crate::application::error::ProcessError;
use crate::application::ports::{
    ScratchLease, ScratchStorePort, SynthesisEnginePort, SynthesisJob, WaveformProbePort,
};
use crate::config::SynthesisConfig;

/// ProcessContent 命令
#[derive(Debug, Clone)]
pub struct ProcessContentCommand {
    /// 要合成的文本
    pub text: String,
    /// 参考音色样本的原始波形字节
    pub reference_audio: Vec<u8>,
}

/// ProcessContent Handler
pub struct ProcessContentHandler {
    scratch: Arc<dyn ScratchStorePort>,
    engine: Arc<dyn SynthesisEnginePort>,
    probe: Arc<dyn WaveformProbePort>,
    synthesis: SynthesisConfig,
}

impl ProcessContentHandler {
    pub fn new(
        scratch: Arc<dyn ScratchStorePort>,
        engine: Arc<dyn SynthesisEnginePort>,
        probe: Arc<dyn WaveformProbePort>,
        synthesis: SynthesisConfig,
    ) -> Self {
        Self {
            scratch,
            engine,
            probe,
            synthesis,
        }
    }

    /// 处理一次合成请求
    ///
    /// 返回合成音频的原始字节；两个临时工件在返回前删除，
    /// 成功与失败路径一致。
    pub async fn handle(&self, cmd: ProcessContentCommand) -> Result<Vec<u8>, ProcessError> {
        if cmd.text.trim().is_empty() {
            return Err(ProcessError::validation("text must not be empty"));
        }

        let lease = self.scratch.acquire().await?;
        let request_id = lease.request_id();

        tracing::debug!(
            request_id = %request_id,
            text_len = cmd.text.len(),
            audio_len = cmd.reference_audio.len(),
            "Processing synthesis request"
        );

        let outcome = self.run(&cmd, &lease).await;

        // 工件删除不依赖 outcome
        if let Err(e) = lease.release().await {
            tracing::warn!(request_id = %request_id, error = %e, "Failed to release scratch lease");
        }

        match &outcome {
            Ok(audio) => {
                tracing::info!(
                    request_id = %request_id,
                    audio_size = audio.len(),
                    "Synthesis completed"
                );
            }
            Err(e) => {
                tracing::warn!(
                    request_id = %request_id,
                    kind = e.kind(),
                    error = %e,
                    "Synthesis failed"
                );
            }
        }

        outcome
    }

    async fn run(
        &self,
        cmd: &ProcessContentCommand,
        lease: &ScratchLease,
    ) -> Result<Vec<u8>, ProcessError> {
        self.stage_reference(cmd, lease).await?;

        let job = SynthesisJob {
            text: cmd.text.clone(),
            language: self.synthesis.language.clone(),
            speaker_wav: lease.input_path().to_path_buf(),
            output_path: lease.output_path().to_path_buf(),
        };

        self.engine.synthesize(job).await?;

        let audio = lease.read_output().await?;
        if audio.is_empty() {
            return Err(ProcessError::engine("engine produced empty audio"));
        }

        Ok(audio)
    }

    /// 将参考样本落盘到输入工件
    ///
    /// 请求未携带音频时回退到启动时配置的默认参考音色
    async fn stage_reference(
        &self,
        cmd: &ProcessContentCommand,
        lease: &ScratchLease,
    ) -> Result<(), ProcessError> {
        if cmd.reference_audio.is_empty() {
            let default_ref = self.synthesis.default_voice_ref.as_ref().ok_or_else(|| {
                ProcessError::validation("reference audio must not be empty")
            })?;

            tokio::fs::copy(default_ref, lease.input_path())
                .await
                .map_err(|e| {
                    ProcessError::resource(format!("failed to stage default voice reference: {}", e))
                })?;

            return Ok(());
        }

        let info = self.probe.probe(&cmd.reference_audio)?;
        tracing::debug!(
            request_id = %lease.request_id(),
            sample_rate = ?info.sample_rate,
            channels = ?info.channels,
            "Reference waveform accepted"
        );

        lease.write_input(&cmd.reference_audio).await?;
        Ok(())
    }
}

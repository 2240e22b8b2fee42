//! Waveform Probe Port - 参考音频探测

use thiserror::Error;

/// 波形探测错误
#[derive(Debug, Error)]
pub enum WaveformError {
    #[error("Audio data too short to be a waveform")]
    TooShort,

    #[error("Undecodable audio: {0}")]
    Undecodable(String),

    #[error("No audio track found")]
    NoTrack,
}

/// 探测结果
#[derive(Debug, Clone, Copy)]
pub struct WaveformInfo {
    /// 采样率（容器未声明时为 None）
    pub sample_rate: Option<u32>,
    /// 声道数
    pub channels: Option<u16>,
}

/// Waveform Probe Port
///
/// 校验一段字节是否为可解码的音频波形
pub trait WaveformProbePort: Send + Sync {
    fn probe(&self, data: &[u8]) -> Result<WaveformInfo, WaveformError>;
}

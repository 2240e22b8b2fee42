//! WAV Probe - 基于 symphonia 的参考波形探测
//!
//! 只探测容器格式与音轨参数，不做完整解码。

use std::io::Cursor;
use symphonia::core::formats::{FormatOptions, FormatReader as _};
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::{WaveformError, WaveformInfo, WaveformProbePort};

/// WAV 最小长度（RIFF 头 + fmt chunk + data chunk 头）
const MIN_WAV_BYTES: usize = 44;

/// 基于 symphonia 的波形探测器
pub struct SymphoniaWavProbe;

impl SymphoniaWavProbe {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SymphoniaWavProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl WaveformProbePort for SymphoniaWavProbe {
    fn probe(&self, data: &[u8]) -> Result<WaveformInfo, WaveformError> {
        if data.len() < MIN_WAV_BYTES {
            return Err(WaveformError::TooShort);
        }

        let cursor = Cursor::new(data.to_vec());
        let stream = MediaSourceStream::new(Box::new(cursor), Default::default());

        let mut hint = Hint::new();
        hint.with_extension("wav");

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                stream,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| WaveformError::Undecodable(e.to_string()))?;

        let track = probed
            .format
            .default_track()
            .ok_or(WaveformError::NoTrack)?;

        Ok(WaveformInfo {
            sample_rate: track.codec_params.sample_rate,
            channels: track.codec_params.channels.map(|c| c.count() as u16),
        })
    }
}

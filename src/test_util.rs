//! 测试辅助 - 构造合法的 PCM16 WAV 字节

/// 生成 16kHz 单声道 PCM16 WAV 字节
///
/// `seed` 用于让不同请求的样本内容互不相同
pub(crate) fn wav_fixture(num_samples: usize, seed: u32) -> Vec<u8> {
    let sample_rate: u32 = 16000;
    let bits_per_sample: u16 = 16;
    let channels: u16 = 1;
    let block_align = channels * bits_per_sample / 8;
    let byte_rate = sample_rate * block_align as u32;
    let data_size = (num_samples * block_align as usize) as u32;

    let mut wav = Vec::with_capacity(44 + data_size as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_size).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&channels.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&bits_per_sample.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_size.to_le_bytes());

    for i in 0..num_samples {
        let sample = ((i as u32).wrapping_mul(seed.wrapping_add(31)) % 20000) as i16 - 10000;
        wav.extend_from_slice(&sample.to_le_bytes());
    }

    wav
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_has_riff_header() {
        let wav = wav_fixture(16, 1);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        assert_eq!(wav.len(), 44 + 32);
    }

    #[test]
    fn test_distinct_seeds_differ() {
        assert_ne!(wav_fixture(64, 1), wav_fixture(64, 2));
    }
}

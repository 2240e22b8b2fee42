//! Audio Adapters - 波形探测实现

mod wav_probe;

pub use wav_probe::SymphoniaWavProbe;

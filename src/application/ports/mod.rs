//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod scratch;
mod synthesis_engine;
mod waveform;

pub use scratch::{ScratchError, ScratchLease, ScratchStorePort};
pub use synthesis_engine::{EngineError, SerializedEngine, SynthesisEnginePort, SynthesisJob};
pub use waveform::{WaveformError, WaveformInfo, WaveformProbePort};

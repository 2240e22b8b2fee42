//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（SynthesisEngine、ScratchStore、WaveformProbe）
//! - process_content: ProcessContent 请求处理管线
//! - error: 应用层错误定义

pub mod error;
pub mod ports;
pub mod process_content;

pub use error::ProcessError;
pub use process_content::{ProcessContentCommand, ProcessContentHandler};

pub use ports::{
    // Synthesis engine
    EngineError,
    SerializedEngine,
    SynthesisEnginePort,
    SynthesisJob,
    // Scratch store
    ScratchError,
    ScratchLease,
    ScratchStorePort,
    // Waveform probe
    WaveformError,
    WaveformInfo,
    WaveformProbePort,
};

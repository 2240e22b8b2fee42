//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod audio;
pub mod engine;
pub mod storage;

pub use audio::SymphoniaWavProbe;
pub use engine::{
    FakeSynthesisEngine, FakeSynthesisEngineConfig, HttpSynthesisEngine,
    HttpSynthesisEngineConfig,
};
pub use storage::FsScratchStore;

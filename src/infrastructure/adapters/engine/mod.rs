//! Engine Adapters - 合成引擎实现

mod fake_engine;
mod http_engine;

pub use fake_engine::{FakeSynthesisEngine, FakeSynthesisEngineConfig};
pub use http_engine::{HttpSynthesisEngine, HttpSynthesisEngineConfig};

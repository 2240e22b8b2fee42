//! Storage Adapters - 临时工件存储实现

mod scratch_store;

pub use scratch_store::FsScratchStore;

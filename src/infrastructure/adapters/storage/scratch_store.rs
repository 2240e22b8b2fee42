//! Fs Scratch Store - 文件系统临时工件存储
//!
//! 实现 ScratchStorePort trait。每个租约独占一个以 uuid 命名的
//! 子目录，并发在途请求之间路径不可能重叠。

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::application::ports::{ScratchError, ScratchLease, ScratchStorePort};

/// 文件系统工件存储
pub struct FsScratchStore {
    /// 租约根目录
    base_dir: PathBuf,
}

impl FsScratchStore {
    /// 创建新的工件存储
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self, ScratchError> {
        let base_dir = base_dir.as_ref().to_path_buf();

        // 确保目录存在
        fs::create_dir_all(&base_dir)
            .await
            .map_err(|e| ScratchError::IoError(e.to_string()))?;

        Ok(Self { base_dir })
    }

    /// 获取租约根目录
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

#[async_trait]
impl ScratchStorePort for FsScratchStore {
    async fn acquire(&self) -> Result<ScratchLease, ScratchError> {
        let request_id = Uuid::new_v4();
        let dir = self.base_dir.join(request_id.to_string());

        fs::create_dir_all(&dir)
            .await
            .map_err(|e| ScratchError::IoError(e.to_string()))?;

        tracing::debug!(request_id = %request_id, "Scratch lease acquired");

        Ok(ScratchLease::new(request_id, dir))
    }
}

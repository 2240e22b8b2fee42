//! Scratch Store Port - 每请求临时工件管理
//!
//! 每个在途请求持有唯一的一对工件路径（参考样本 + 合成输出），
//! 请求结束时必须删除，成功与失败路径一致。

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use uuid::Uuid;

/// 临时工件错误
#[derive(Debug, Error)]
pub enum ScratchError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("File not found: {0}")]
    FileNotFound(String),
}

/// 一次请求的工件租约
///
/// 独占一个以请求 ID 命名的目录，内含输入/输出两个工件路径。
/// 正常路径通过 [`ScratchLease::release`] 删除；未显式释放时
/// Drop 兜底做同步删除，保证 panic 退出也不留残骸。
#[derive(Debug)]
pub struct ScratchLease {
    request_id: Uuid,
    dir: PathBuf,
    input_path: PathBuf,
    output_path: PathBuf,
    released: bool,
}

impl ScratchLease {
    /// 创建租约（目录由 ScratchStore 预先建好）
    pub fn new(request_id: Uuid, dir: PathBuf) -> Self {
        let input_path = dir.join("reference.wav");
        let output_path = dir.join("synthesized.wav");
        Self {
            request_id,
            dir,
            input_path,
            output_path,
            released: false,
        }
    }

    /// 请求 ID
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// 参考样本工件路径
    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    /// 合成输出工件路径
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// 写入参考样本字节
    pub async fn write_input(&self, data: &[u8]) -> Result<(), ScratchError> {
        fs::write(&self.input_path, data)
            .await
            .map_err(|e| ScratchError::IoError(e.to_string()))
    }

    /// 回读合成输出字节
    pub async fn read_output(&self) -> Result<Vec<u8>, ScratchError> {
        if !self.output_path.exists() {
            return Err(ScratchError::FileNotFound(
                self.output_path.to_string_lossy().to_string(),
            ));
        }

        fs::read(&self.output_path)
            .await
            .map_err(|e| ScratchError::IoError(e.to_string()))
    }

    /// 释放租约，删除目录及其中全部工件
    pub async fn release(mut self) -> Result<(), ScratchError> {
        self.released = true;

        fs::remove_dir_all(&self.dir)
            .await
            .map_err(|e| ScratchError::IoError(e.to_string()))?;

        tracing::debug!(request_id = %self.request_id, "Scratch lease released");
        Ok(())
    }
}

impl Drop for ScratchLease {
    fn drop(&mut self) {
        if !self.released {
            // 兜底清理，覆盖未走到 release 的退出路径
            if let Err(e) = std::fs::remove_dir_all(&self.dir) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(
                        request_id = %self.request_id,
                        error = %e,
                        "Failed to clean scratch lease on drop"
                    );
                }
            } else {
                tracing::debug!(request_id = %self.request_id, "Scratch lease cleaned on drop");
            }
        }
    }
}

/// Scratch Store Port
///
/// 工件租约的获取接口，保证并发在途请求之间路径互不重叠
#[async_trait]
pub trait ScratchStorePort: Send + Sync {
    /// 获取一个新的工件租约
    async fn acquire(&self) -> Result<ScratchLease, ScratchError>;
}

//! 制品存储
//!
//! 持久化生成的二进制结果（图片/音频），返回稳定的不透明引用。
//! 引用对调用方只有"稳定、可再解析"的含义；按媒体类型分目录
//! 只是运维便利，不属于语义契约。

use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

use crate::error::{AppError, Result};

/// 媒体类型提示，决定分区目录与扩展名
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// 图片
    Image,
    /// 音频
    Audio,
    /// 其他
    Other,
}

impl MediaKind {
    fn partition(&self) -> &'static str {
        match self {
            MediaKind::Image => "images",
            MediaKind::Audio => "audio",
            MediaKind::Other => "misc",
        }
    }

    fn extension(&self) -> &'static str {
        match self {
            MediaKind::Image => "png",
            MediaKind::Audio => "mp3",
            MediaKind::Other => "bin",
        }
    }
}

/// 制品存储 trait
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// 持久化字节并返回稳定引用；空载荷返回 `InvalidArtifact`
    async fn store(&self, bytes: &[u8], kind: MediaKind) -> Result<String>;

    /// 删除引用指向的制品，引用不存在不算错误
    async fn delete(&self, reference: &str) -> Result<()>;
}

/// 文件系统制品存储
pub struct FsArtifactStore {
    root: PathBuf,
}

impl FsArtifactStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// 将引用解析为根目录下的路径，拒绝越界
    fn resolve(&self, reference: &str) -> Result<PathBuf> {
        let rel = Path::new(reference);
        let safe = rel
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        if !safe {
            return Err(AppError::Validation(format!(
                "Invalid artifact reference: {}",
                reference
            )));
        }
        Ok(self.root.join(rel))
    }
}

#[async_trait]
impl ArtifactStore for FsArtifactStore {
    async fn store(&self, bytes: &[u8], kind: MediaKind) -> Result<String> {
        if bytes.is_empty() {
            return Err(AppError::InvalidArtifact(
                "Refusing to store empty artifact".to_string(),
            ));
        }

        let name = format!("{}.{}", Uuid::new_v4(), kind.extension());
        let reference = format!("{}/{}", kind.partition(), name);

        let dir = self.root.join(kind.partition());
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| AppError::StorageUnavailable(e.to_string()))?;
        tokio::fs::write(dir.join(&name), bytes)
            .await
            .map_err(|e| AppError::StorageUnavailable(e.to_string()))?;

        debug!("Stored artifact: {} ({} bytes)", reference, bytes.len());
        Ok(reference)
    }

    async fn delete(&self, reference: &str) -> Result<()> {
        let path = self.resolve(reference)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            // 幂等删除：不存在视为已删除
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::StorageUnavailable(e.to_string())),
        }
    }
}

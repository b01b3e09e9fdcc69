//! 内容缓存
//!
//! 确定性键到制品引用的持久映射。写入是 insert-if-absent：
//! 键派生基于内容，同键并发写入的引用指向相同内容，后写失败无害。
//!
//! 调用方约定：lookup 失败按未命中处理，store 失败仅记日志，
//! 两者都不得阻断生成流程。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use surrealdb::{Surreal, engine::any::Any};

use crate::error::Result;

/// 缓存记录（cached_artifact 表的内容）
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedArtifact {
    reference: String,
    created_at: DateTime<Utc>,
}

/// 内容缓存 trait
#[async_trait]
pub trait ContentCache: Send + Sync {
    /// 查询键对应的制品引用
    async fn lookup(&self, key: &str) -> Result<Option<String>>;

    /// 记录键到引用的映射（insert-if-absent，可并发）
    async fn store(&self, key: &str, reference: &str) -> Result<()>;
}

/// SurrealDB 缓存实现，记录键即缓存键
#[derive(Clone)]
pub struct SurrealContentCache {
    db: Surreal<Any>,
}

impl SurrealContentCache {
    pub fn new(db: Surreal<Any>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContentCache for SurrealContentCache {
    async fn lookup(&self, key: &str) -> Result<Option<String>> {
        let entry: Option<CachedArtifact> = self.db.select(("cached_artifact", key)).await?;
        Ok(entry.map(|e| e.reference))
    }

    async fn store(&self, key: &str, reference: &str) -> Result<()> {
        let entry = CachedArtifact {
            reference: reference.to_string(),
            created_at: Utc::now(),
        };

        let created: std::result::Result<Option<CachedArtifact>, surrealdb::Error> = self
            .db
            .create(("cached_artifact", key))
            .content(entry)
            .await;

        match created {
            Ok(_) => Ok(()),
            // 已有记录即另一个写者先到，内容等价，忽略
            Err(e) if e.to_string().contains("already exists") => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// 进程内缓存实现（测试与单机开发用）
#[derive(Default)]
pub struct InMemoryContentCache {
    entries: DashMap<String, String>,
}

impl InMemoryContentCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContentCache for InMemoryContentCache {
    async fn lookup(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).map(|e| e.value().clone()))
    }

    async fn store(&self, key: &str, reference: &str) -> Result<()> {
        self.entries
            .entry(key.to_string())
            .or_insert_with(|| reference.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lookup_miss_then_hit() {
        let cache = InMemoryContentCache::new();
        assert_eq!(cache.lookup("k1").await.unwrap(), None);

        cache.store("k1", "audio/a.mp3").await.unwrap();
        assert_eq!(
            cache.lookup("k1").await.unwrap().as_deref(),
            Some("audio/a.mp3")
        );
    }

    #[tokio::test]
    async fn test_store_is_insert_if_absent() {
        let cache = InMemoryContentCache::new();
        cache.store("k1", "first").await.unwrap();
        cache.store("k1", "second").await.unwrap();
        assert_eq!(cache.lookup("k1").await.unwrap().as_deref(), Some("first"));
    }
}

//! 内容寻址缓存模块
//!
//! 生成管线的三块基石：确定性键派生、键到制品引用的持久缓存、
//! 制品字节的落盘存储。

pub mod artifact_store;
pub mod content_cache;
pub mod key;

pub use artifact_store::{ArtifactStore, FsArtifactStore, MediaKind};
pub use content_cache::{ContentCache, InMemoryContentCache, SurrealContentCache};
pub use key::{ArtifactKind, cache_key, content_hash};

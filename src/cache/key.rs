//! 缓存键派生
//!
//! 键是"生成种类 + 语义载荷 + 所有影响输出的参数"规范串接后的 sha256。
//! 两个请求缓存等价当且仅当派生键相等，精确匹配，不做近似。

use sha2::{Digest, Sha256};

/// 生成种类标签，参与键派生
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// 语音合成
    Speech,
    /// 配图合成
    Illustration,
}

impl ArtifactKind {
    fn tag(&self) -> &'static str {
        match self {
            ArtifactKind::Speech => "speech",
            ArtifactKind::Illustration => "illustration",
        }
    }
}

/// 字面文本的内容哈希（缓存键派生与题目去重共用）
pub fn content_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex_encode(&hasher.finalize())
}

/// 派生缓存键
///
/// `parts` 依次为语义载荷与影响输出的参数（如语音音色、模型名），
/// 以换行符规范串接，顺序固定。
pub fn cache_key(kind: ArtifactKind, parts: &[&str]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(kind.tag().as_bytes());
    for part in parts {
        hasher.update(b"\n");
        hasher.update(part.as_bytes());
    }
    hex_encode(&hasher.finalize())
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

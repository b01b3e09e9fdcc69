//! 结构化输出解码
//!
//! 模型的"JSON"输出经常裹在 Markdown 代码围栏或说明文字里，
//! 剥离逻辑收敛为一个纯函数，便于单独针对畸形围栏做单元测试。

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;

use crate::error::{AppError, Result};

static FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^```(?:json|JSON)?\s*\n?(.*?)\n?```$").expect("fence regex")
});

/// 剥离包裹 JSON 主体的已知记号（代码围栏、前后说明文字）
///
/// 不解析内容本身；找不到 JSON 边界时原样返回去除首尾空白的输入，
/// 让后续解析报出真实错误。
pub fn strip_wrappers(raw: &str) -> &str {
    let trimmed = raw.trim();

    if let Some(captures) = FENCE.captures(trimmed) {
        if let Some(inner) = captures.get(1) {
            return inner.as_str().trim();
        }
    }

    let open = trimmed.find(['{', '[']);
    let close = trimmed.rfind(['}', ']']);

    match (open, close) {
        (Some(start), Some(end)) if end >= start => &trimmed[start..=end],
        _ => trimmed,
    }
}

/// 剥离包装后按目标形状解析
pub fn decode_structured<T: DeserializeOwned>(raw: &str) -> Result<T> {
    serde_json::from_str(strip_wrappers(raw)).map_err(|e| AppError::Serialization(e.to_string()))
}

//! 有界重试与降级
//!
//! 结构化补全的策略：生成、剥离包装、解析；解析失败用同一提示词
//! 重试到固定上限。全部失败不抛错，由调用方用 `or_degraded` 换成
//! 定义良好的保守默认值——管线宁可悄悄降级也不阻断用户提交流程。

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::genai::client::GenerativeClient;
use crate::genai::decode::decode_structured;

/// 重试结果
#[derive(Debug)]
pub enum RetryOutcome<T> {
    /// 某次尝试成功解析
    Parsed(T),
    /// 所有尝试耗尽
    Exhausted { attempts: u32, last_error: String },
}

/// 对调用方可见的最终结果：要么解析值，要么降级默认值
#[derive(Debug)]
pub enum Structured<T> {
    /// 正常解析的值
    Parsed(T),
    /// 降级默认值
    Degraded(T),
}

impl<T> RetryOutcome<T> {
    /// 耗尽时替换为降级默认值
    pub fn or_degraded(self, fallback: T) -> Structured<T> {
        match self {
            RetryOutcome::Parsed(value) => Structured::Parsed(value),
            RetryOutcome::Exhausted {
                attempts,
                last_error,
            } => {
                warn!(
                    "Structured generation exhausted after {} attempts, degrading: {}",
                    attempts, last_error
                );
                Structured::Degraded(fallback)
            }
        }
    }
}

impl<T> Structured<T> {
    /// 取出内部值
    pub fn into_inner(self) -> T {
        match self {
            Structured::Parsed(value) | Structured::Degraded(value) => value,
        }
    }

    /// 是否为降级结果
    pub fn is_degraded(&self) -> bool {
        matches!(self, Structured::Degraded(_))
    }
}

/// 带重试的结构化补全
///
/// 同一提示词最多尝试 `max_attempts` 次（生成 + 解析合为一次尝试）。
pub async fn structured_with_retry<T: DeserializeOwned>(
    client: &dyn GenerativeClient,
    prompt: &str,
    max_attempts: u32,
) -> RetryOutcome<T> {
    let attempts = max_attempts.max(1);
    let mut last_error = String::new();

    for attempt in 1..=attempts {
        match client.complete(prompt).await {
            Ok(raw) => match decode_structured::<T>(&raw) {
                Ok(value) => return RetryOutcome::Parsed(value),
                Err(e) => {
                    warn!(
                        "Structured decode failed (attempt {}/{}): {}",
                        attempt, attempts, e
                    );
                    last_error = e.to_string();
                }
            },
            Err(e) => {
                warn!(
                    "Generation call failed (attempt {}/{}): {}",
                    attempt, attempts, e
                );
                last_error = e.to_string();
            }
        }
    }

    RetryOutcome::Exhausted {
        attempts,
        last_error,
    }
}

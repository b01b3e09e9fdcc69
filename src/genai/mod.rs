//! 生成式后端模块
//!
//! 对外部生成能力（文本补全、图像合成、语音合成）的薄封装，
//! 重试/降级策略与围栏剥离解析都在这一层收口。

pub mod client;
pub mod decode;
pub mod retry;

pub use client::{GenerativeClient, HttpGenerativeClient};
pub use decode::{decode_structured, strip_wrappers};
pub use retry::{RetryOutcome, Structured, structured_with_retry};

//! Minerva - 生成式练习内容服务
//!
//! 为 AI 辅导应用提供练习题生成、作答评判与薄弱点分析能力，核心是一条
//! "内容寻址缓存 + 幂等去重 + 有界重试结构化解码"的生成管线。

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod genai;
pub mod models;
pub mod observability;
pub mod security;
pub mod services;
pub mod storage;

//! 安全模块
//!
//! 轻量身份中间件：可选的服务级 API Key 校验，加上调用方身份头的
//! 提取。通过校验后把 [`Claims`] 放进请求扩展，处理器直接取用。

use axum::{
    body::Body,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::config::config::SecurityConfig;

/// 默认会员档位
const DEFAULT_TIER: &str = "standard";

/// 请求身份
#[derive(Debug, Clone)]
pub struct Claims {
    /// 用户标识
    pub user_id: String,
    /// 会员档位
    pub tier: String,
}

/// 身份中间件
///
/// 配置了 `api_key` 时校验 `X-API-Key`；`X-User-Id` 必填，缺失即 401。
/// `X-Membership-Tier` 缺省按 standard 处理。
pub async fn identity_middleware(
    State(config): State<Arc<SecurityConfig>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    if !config.api_key.is_empty() {
        let provided = req
            .headers()
            .get("X-API-Key")
            .and_then(|h| h.to_str().ok())
            .unwrap_or("");
        if provided != config.api_key {
            return Err(StatusCode::UNAUTHORIZED);
        }
    }

    let user_id = req
        .headers()
        .get("X-User-Id")
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(StatusCode::UNAUTHORIZED)?
        .to_string();

    let tier = req
        .headers()
        .get("X-Membership-Tier")
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_TIER)
        .to_string();

    req.extensions_mut().insert(Claims { user_id, tier });

    Ok(next.run(req).await)
}

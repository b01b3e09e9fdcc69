//! Media Routes
//!
//! 定义媒体合成的 API 路由。

use crate::api::handlers::media_handler::*;
use axum::{Router, routing::post};

use crate::api::app_state::AppState;

/// 创建媒体合成路由器
pub fn create_media_router() -> Router<AppState> {
    Router::new().route("/speech", post(synthesize_speech))
}

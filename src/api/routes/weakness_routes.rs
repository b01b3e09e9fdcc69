//! Weakness Routes
//!
//! 定义薄弱点分析的 API 路由。

use crate::api::handlers::weakness_handler::*;
use axum::{Router, routing::get};

use crate::api::app_state::AppState;

/// 创建薄弱点分析路由器
pub fn create_weakness_router() -> Router<AppState> {
    Router::new().route("/plans/:id/weakness", get(get_weakness_report))
}

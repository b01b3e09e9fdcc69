//! Plan Routes
//!
//! 定义学习计划相关的 API 路由。

use crate::api::handlers::plan_handler::*;
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::app_state::AppState;

/// 创建学习计划路由器
pub fn create_plan_router() -> Router<AppState> {
    Router::new()
        .route("/plans", post(create_plan))
        .route("/plans", get(list_plans))
        .route("/plans/:id", get(get_plan))
}

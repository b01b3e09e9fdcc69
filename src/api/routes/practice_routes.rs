//! Practice Routes
//!
//! 定义练习生成与作答提交的 API 路由。

use crate::api::handlers::{grading_handler::*, practice_handler::*};
use axum::{Router, routing::post};

use crate::api::app_state::AppState;

/// 创建练习路由器
pub fn create_practice_router() -> Router<AppState> {
    Router::new()
        .route("/plans/:id/practice", post(generate_practice))
        .route("/plans/:id/submissions", post(submit_answers))
}

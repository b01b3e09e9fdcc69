use axum::{
    Json,
    extract::{Extension, Path, State},
    response::IntoResponse,
};
use tracing::debug;

use crate::{
    api::{app_state::AppState, dto::practice_dto::*},
    error::AppError,
    security::Claims,
    services::practice::GenerateParams,
};

/// 缺省题目数量
const DEFAULT_COUNT: usize = 5;

/// 缺省难度
const DEFAULT_DIFFICULTY: u8 = 2;

pub async fn generate_practice(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(plan_id): Path<String>,
    Json(request): Json<GeneratePracticeRequest>,
) -> Result<impl IntoResponse, AppError> {
    let params = GenerateParams {
        count: request.count.unwrap_or(DEFAULT_COUNT),
        difficulty: request.difficulty.unwrap_or(DEFAULT_DIFFICULTY),
        weakness_mode: request.weakness_mode.unwrap_or(false),
    };

    debug!(
        "Generating practice for plan {}: count={}, difficulty={}, weakness_mode={}",
        plan_id, params.count, params.difficulty, params.weakness_mode
    );

    let questions = state
        .practice_service
        .generate(&claims.user_id, &plan_id, params)
        .await?;

    let questions: Vec<QuestionView> = questions.into_iter().map(Into::into).collect();
    let count = questions.len();

    Ok(Json(GeneratePracticeResponse {
        plan_id,
        questions,
        count,
    }))
}

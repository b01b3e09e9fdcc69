use axum::{
    Json,
    extract::{Extension, Path, State},
    response::IntoResponse,
};
use tracing::debug;

use crate::{
    api::{app_state::AppState, dto::grading_dto::*},
    error::AppError,
    security::Claims,
    services::grading::AnswerSubmission,
};

pub async fn submit_answers(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(plan_id): Path<String>,
    Json(request): Json<SubmitAnswersRequest>,
) -> Result<impl IntoResponse, AppError> {
    debug!(
        "Submitting {} answers for plan {}",
        request.answers.len(),
        plan_id
    );

    let answers: Vec<AnswerSubmission> = request
        .answers
        .into_iter()
        .map(|item| AnswerSubmission {
            question_id: item.question_id,
            answer: item.answer,
        })
        .collect();

    let outcome = state
        .grading_service
        .submit(&claims.user_id, &plan_id, answers)
        .await?;

    Ok(Json(SubmitAnswersResponse::from(outcome)))
}

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::debug;

use crate::{
    api::{app_state::AppState, dto::plan_dto::*},
    error::AppError,
    models::plan::StudyPlan,
    security::Claims,
};

pub async fn create_plan(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<CreatePlanRequest>,
) -> Result<impl IntoResponse, AppError> {
    if request.goal.trim().is_empty() {
        return Err(AppError::Validation("Plan goal must not be empty".into()));
    }

    debug!("Creating plan for user {}: {}", claims.user_id, request.goal);

    let plan = StudyPlan::new(&claims.user_id, request.goal.trim(), request.subject);
    let created = state.plan_repository.create(&plan).await?;

    Ok((StatusCode::CREATED, Json(PlanResponse::from(created))))
}

pub async fn get_plan(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let plan = state
        .plan_repository
        .get_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Plan not found: {}", id)))?;

    Ok(Json(PlanResponse::from(plan)))
}

pub async fn list_plans(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<ListPlansParams>,
) -> Result<impl IntoResponse, AppError> {
    let page = params.page.unwrap_or(1).max(1);
    let page_size = params.page_size.unwrap_or(20).clamp(1, 100);

    let plans = state
        .plan_repository
        .list_by_user(&claims.user_id, page_size, (page - 1) * page_size)
        .await?;

    let plans: Vec<PlanResponse> = plans.into_iter().map(Into::into).collect();
    let count = plans.len();

    Ok(Json(PlanListResponse { plans, count }))
}

#[derive(Debug, Deserialize, Default)]
pub struct ListPlansParams {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

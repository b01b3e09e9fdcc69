use axum::{
    Json,
    extract::{Extension, Path, State},
    response::IntoResponse,
};
use tracing::debug;

use crate::{
    api::{app_state::AppState, dto::weakness_dto::*},
    error::AppError,
    security::Claims,
};

pub async fn get_weakness_report(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(plan_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    debug!("Analyzing weakness for plan {}", plan_id);

    let report = state
        .weakness_service
        .analyze(&claims.user_id, &plan_id)
        .await?;

    Ok(Json(WeaknessReportResponse::from(report)))
}

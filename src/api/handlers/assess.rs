use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::errors::AppError;
use crate::intelligence::pipeline;
use crate::models::{Assessment, RawAnswers};
use crate::AppState;

use super::ApiResponse;

/// POST /api/assess — score one questionnaire submission
pub async fn assess(
    State(state): State<AppState>,
    body: Result<Json<RawAnswers>, JsonRejection>,
) -> Result<Json<ApiResponse<Assessment>>, AppError> {
    let Json(answers) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let problems = answers.domain_violations();
    if !problems.is_empty() {
        return Err(AppError::BadRequest(problems.join("; ")));
    }

    let assessment = pipeline::assess(&answers, &state.bundle)?;

    Ok(Json(ApiResponse::ok(assessment)))
}

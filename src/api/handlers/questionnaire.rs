use axum::Json;

use crate::models::{questionnaire, Question};

use super::ApiResponse;

/// GET /api/questionnaire — questions in display order
pub async fn list() -> Json<ApiResponse<Vec<Question>>> {
    Json(ApiResponse::ok(questionnaire()))
}

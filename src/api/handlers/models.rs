use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::intelligence::ArtifactInfo;
use crate::models::FEATURE_NAMES;
use crate::AppState;

use super::ApiResponse;

#[derive(Serialize)]
pub struct ModelsOverview {
    pub model_dir: String,
    pub ensemble_size: usize,
    pub feature_names: &'static [&'static str],
    pub artifacts: Vec<ArtifactInfo>,
}

/// GET /api/models — loaded artifacts and their fingerprints
pub async fn overview(State(state): State<AppState>) -> Json<ApiResponse<ModelsOverview>> {
    Json(ApiResponse::ok(ModelsOverview {
        model_dir: state.config.model_dir.display().to_string(),
        ensemble_size: state.bundle.ensemble.len(),
        feature_names: &FEATURE_NAMES,
        artifacts: state.bundle.artifacts.clone(),
    }))
}

//! Handler for full dataset validation.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use survey_core::point::SurveyData;
use survey_core::report::ValidationReport;
use survey_core::tolerance::validate_required_precision;
use survey_core::traverse::TraverseOptions;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body shared by `/validate` and `/traverse/adjust`: the dataset
/// itself plus optional adjustment overrides.
#[derive(Debug, Deserialize)]
pub struct SurveyRequest {
    #[serde(flatten)]
    pub data: SurveyData,
    #[serde(default)]
    pub traverse_options: Option<TraverseOptions>,
}

impl SurveyRequest {
    /// Reject overrides the engine would otherwise silently ignore.
    pub fn checked_options(&self) -> AppResult<Option<TraverseOptions>> {
        if let Some(precision) = self.traverse_options.and_then(|o| o.required_precision) {
            validate_required_precision(precision)?;
        }
        Ok(self.traverse_options)
    }
}

/// POST /api/v1/validate
///
/// Run every check over the dataset and return the full report. Degenerate
/// datasets still produce a report (status FAIL), never an HTTP error.
pub async fn validate(
    State(state): State<AppState>,
    Json(request): Json<SurveyRequest>,
) -> AppResult<Json<DataResponse<ValidationReport>>> {
    let options = request.checked_options()?;
    let data = request.data;
    tracing::info!(
        project_id = %data.project_id,
        points = data.points.len(),
        "Validating survey"
    );

    let engine = Arc::clone(&state.engine);
    let report = tokio::task::spawn_blocking(move || {
        engine.validate_with_options(&data, options.as_ref())
    })
    .await
    .map_err(|e| AppError::InternalError(format!("Validation task failed: {e}")))?;

    Ok(Json(DataResponse { data: report }))
}

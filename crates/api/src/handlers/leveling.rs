//! Handlers for leveling reduction.

use axum::Json;
use serde::Deserialize;
use survey_core::leveling::{
    reduce_levels, reduce_rise_fall, LevelingObservation, LevelingResult, RiseFallStep,
};
use survey_core::tolerance::ToleranceClass;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;

/// Request body for POST /leveling/reduce.
#[derive(Debug, Deserialize)]
pub struct ReduceLevelsRequest {
    #[serde(default)]
    pub observations: Vec<LevelingObservation>,
    pub start_height: f64,
    /// Known closing benchmark height; a closed loop is assumed when absent.
    #[serde(default)]
    pub end_height: Option<f64>,
    #[serde(default)]
    pub tolerance_class: Option<ToleranceClass>,
}

/// Request body for POST /leveling/rise-fall.
#[derive(Debug, Deserialize)]
pub struct RiseFallRequest {
    #[serde(default)]
    pub steps: Vec<RiseFallStep>,
    pub start_height: f64,
    #[serde(default)]
    pub end_height: Option<f64>,
    #[serde(default)]
    pub tolerance_class: Option<ToleranceClass>,
}

/// POST /api/v1/leveling/reduce
pub async fn reduce(
    Json(request): Json<ReduceLevelsRequest>,
) -> AppResult<Json<DataResponse<LevelingResult>>> {
    if let Some(obs) = request
        .observations
        .iter()
        .find(|o| o.distance.is_some_and(|d| d < 0.0))
    {
        return Err(AppError::BadRequest(format!(
            "Negative setup distance at point '{}'",
            obs.point_id
        )));
    }

    let result = reduce_levels(
        &request.observations,
        request.start_height,
        request.end_height,
        request.tolerance_class.unwrap_or_default(),
    );
    tracing::info!(
        observations = request.observations.len(),
        status = ?result.status,
        misclosure = result.height_misclosure,
        "Levels reduced"
    );
    Ok(Json(DataResponse { data: result }))
}

/// POST /api/v1/leveling/rise-fall
pub async fn rise_fall(
    Json(request): Json<RiseFallRequest>,
) -> AppResult<Json<DataResponse<LevelingResult>>> {
    if let Some(step) = request.steps.iter().find(|s| s.rise < 0.0 || s.fall < 0.0) {
        return Err(AppError::BadRequest(format!(
            "Rise and fall must be non-negative at point '{}'",
            step.point_id
        )));
    }

    let result = reduce_rise_fall(
        &request.steps,
        request.start_height,
        request.end_height,
        request.tolerance_class.unwrap_or_default(),
    );
    tracing::info!(
        steps = request.steps.len(),
        status = ?result.status,
        misclosure = result.height_misclosure,
        "Rise and fall reduced"
    );
    Ok(Json(DataResponse { data: result }))
}

use axum::Json;
use survey_core::traverse::{adjust_traverse, TraverseResult};

use crate::error::AppResult;
use crate::handlers::validation::SurveyRequest;
use crate::response::DataResponse;

/// POST /api/v1/traverse/adjust
///
/// Bowditch adjustment without the other checks. Too few traverse points
/// yields an `ERROR` result in a 200 response.
pub async fn adjust(
    Json(request): Json<SurveyRequest>,
) -> AppResult<Json<DataResponse<TraverseResult>>> {
    let options = request.checked_options()?;
    let result = adjust_traverse(&request.data, options.as_ref());
    tracing::info!(
        project_id = %request.data.project_id,
        status = ?result.status,
        precision = result.precision,
        "Traverse adjusted"
    );
    Ok(Json(DataResponse { data: result }))
}

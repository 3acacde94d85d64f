//! Route definitions for dataset validation and traverse adjustment.

use axum::routing::post;
use axum::Router;

use crate::handlers::{traverse, validation};
use crate::state::AppState;

/// ```text
/// POST   /validate          -> validate
/// POST   /traverse/adjust   -> adjust
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/validate", post(validation::validate))
        .route("/traverse/adjust", post(traverse::adjust))
}

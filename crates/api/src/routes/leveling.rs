use axum::routing::post;
use axum::Router;

use crate::handlers::leveling;
use crate::state::AppState;

/// Routes mounted at `/leveling`.
///
/// ```text
/// POST   /reduce      -> reduce
/// POST   /rise-fall   -> rise_fall
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reduce", post(leveling::reduce))
        .route("/rise-fall", post(leveling::rise_fall))
}

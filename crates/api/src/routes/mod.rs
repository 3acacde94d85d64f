pub mod health;
pub mod leveling;
pub mod survey;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /validate                 full validation report (POST)
/// /traverse/adjust          Bowditch adjustment only (POST)
/// /leveling/reduce          reduce staff readings (POST)
/// /leveling/rise-fall       reduce pre-computed rise/fall steps (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(survey::router())
        .nest("/leveling", leveling::router())
}

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use survey_api::config::ServerConfig;
use survey_api::router::build_app_router;
use survey_api::state::AppState;

/// Test `ServerConfig` with safe defaults: any origin, 30-second timeout,
/// no static directory.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["*".to_string()],
        request_timeout_secs: 30,
        static_dir: None,
    }
}

/// Build the application router exactly as production does.
pub fn build_test_app() -> Router {
    let config = test_config();
    build_app_router(AppState::new(config.clone()), &config)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: String) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// A closed four-sided traverse that returns to its first station by ID.
pub fn closed_square() -> serde_json::Value {
    serde_json::json!({
        "project_id": "SQUARE",
        "coordinate_system": "local",
        "points": [
            {"point_id": "A", "easting": 1000.0, "northing": 1000.0, "survey_type": "traverse"},
            {"point_id": "B", "easting": 1100.0, "northing": 1000.0, "survey_type": "traverse"},
            {"point_id": "C", "easting": 1100.0, "northing": 1100.0, "survey_type": "traverse"},
            {"point_id": "D", "easting": 1000.0, "northing": 1100.0, "survey_type": "traverse"},
            {"point_id": "A", "easting": 1000.0, "northing": 1000.0, "survey_type": "traverse"}
        ]
    })
}

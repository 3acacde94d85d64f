//! Tests for request rejection and the JSON error body.

mod common;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::{body_json, build_test_app, closed_square, post_json, post_raw};
use serde_json::json;
use survey_api::error::AppError;
use survey_core::error::CoreError;

#[tokio::test]
async fn malformed_json_is_rejected() {
    let response = post_raw(
        build_test_app(),
        "/api/v1/validate",
        "{\"project_id\": \"X\", \"points\": [".to_string(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_coordinates_are_rejected() {
    let response = post_json(
        build_test_app(),
        "/api/v1/validate",
        json!({"project_id": "X", "points": [{"point_id": "A", "easting": 1.0}]}),
    )
    .await;
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn non_positive_required_precision_is_a_validation_error() {
    let mut body = closed_square();
    body["traverse_options"] = json!({"required_precision": -5000});

    let response = post_json(build_test_app(), "/api/v1/validate", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("required_precision"));
}

#[tokio::test]
async fn unknown_tolerance_class_is_rejected() {
    let response = post_json(
        build_test_app(),
        "/api/v1/leveling/reduce",
        json!({"observations": [], "start_height": 100.0, "tolerance_class": "fourth_order"}),
    )
    .await;
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn negative_setup_distance_is_a_bad_request() {
    let response = post_json(
        build_test_app(),
        "/api/v1/leveling/reduce",
        json!({
            "observations": [
                {"point_id": "BM1", "backsight": 1.5},
                {"point_id": "TP1", "foresight": 1.2, "distance": -10.0}
            ],
            "start_height": 100.0
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].as_str().unwrap().contains("TP1"));
}

#[tokio::test]
async fn negative_rise_is_a_bad_request() {
    let response = post_json(
        build_test_app(),
        "/api/v1/leveling/rise-fall",
        json!({
            "steps": [{"point_id": "A"}, {"point_id": "B", "rise": -0.5}],
            "start_height": 100.0
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn out_of_range_height_fails_json_decoding() {
    let response = post_raw(
        build_test_app(),
        "/api/v1/leveling/rise-fall",
        r#"{"steps": [{"point_id": "A"}, {"point_id": "B", "rise": 0.5}], "start_height": 1e400}"#
            .to_string(),
    )
    .await;
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn core_validation_error_maps_to_400() {
    let response =
        AppError::from(CoreError::Validation("required_precision must be positive".into()))
            .into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "required_precision must be positive");
}

#[tokio::test]
async fn internal_error_message_is_sanitized() {
    let response = AppError::InternalError("join handle panicked".into()).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

//! HTTP-level integration tests for the `/leveling` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, post_json};
use serde_json::json;

fn loop_observations(closing_fs: f64) -> serde_json::Value {
    json!([
        {"point_id": "BM1", "backsight": 1.500},
        {"point_id": "TP1", "backsight": 1.350, "foresight": 1.200, "distance": 200.0},
        {"point_id": "TP2", "backsight": 1.400, "foresight": 1.600, "distance": 200.0},
        {"point_id": "BM1", "foresight": closing_fs, "distance": 200.0}
    ])
}

#[tokio::test]
async fn closed_loop_passes() {
    let response = post_json(
        build_test_app(),
        "/api/v1/leveling/reduce",
        json!({"observations": loop_observations(1.456), "start_height": 100.0}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let result = &json["data"];
    assert_eq!(result["status"], "PASS");
    assert_eq!(result["start_bm"], "BM1");
    assert_eq!(result["points"].as_array().unwrap().len(), 4);
    assert_eq!(result["points"][3]["adjusted_rl"], 100.0);
    assert!(result["points"][0].get("rise").is_none());
}

#[tokio::test]
async fn first_order_rejects_the_same_loop() {
    let response = post_json(
        build_test_app(),
        "/api/v1/leveling/reduce",
        json!({
            "observations": loop_observations(1.456),
            "start_height": 100.0,
            "tolerance_class": "first_order"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "FAIL");
}

#[tokio::test]
async fn single_observation_is_an_error_result() {
    let response = post_json(
        build_test_app(),
        "/api/v1/leveling/reduce",
        json!({"observations": [{"point_id": "BM1", "backsight": 1.5}], "start_height": 100.0}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "ERROR");
}

#[tokio::test]
async fn rise_fall_steps_reduce_to_end_height() {
    let response = post_json(
        build_test_app(),
        "/api/v1/leveling/rise-fall",
        json!({
            "steps": [
                {"point_id": "A"},
                {"point_id": "B", "rise": 0.5},
                {"point_id": "C", "fall": 0.2}
            ],
            "start_height": 50.0,
            "end_height": 50.3
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let result = &json["data"];
    assert_eq!(result["status"], "PASS");
    assert_eq!(result["end_bm"], "C");
    assert!(result["height_misclosure"].as_f64().unwrap().abs() < 1e-9);
    assert_eq!(result["allowable_misclosure"], 0.012);
}

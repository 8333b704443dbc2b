use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;

use doctor_cell::router::doctor_routes;
use shared_utils::test_utils::{reference_now, seed_clinic, TestConfig};

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_exception_payload_is_tagged_by_type() {
    let state = TestConfig::default().state_at(reference_now());
    let clinic = seed_clinic(&state, 60).await;
    let app = doctor_routes(state);

    let request = Request::builder()
        .method("POST")
        .uri(format!("/{}/exceptions", clinic.doctor.id))
        .header("content-type", "application/json")
        .body(Body::from(json!({
            "date": "2026-10-20",
            "type": "modified",
            "start_time": "10:00:00",
            "end_time": "14:00:00",
            "reason": "Conference"
        }).to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    assert_eq!(created["type"], json!("modified"));
    assert_eq!(created["start_time"], json!("10:00:00"));

    let day = app
        .oneshot(
            Request::builder()
                .uri(format!("/{}/day?date=2026-10-20", clinic.doctor.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(day.status(), StatusCode::OK);
    let day = body_json(day).await;
    assert_eq!(day["status"], json!("open"));
    assert_eq!(day["start_time"], json!("10:00:00"));
    assert_eq!(day["end_time"], json!("14:00:00"));
}

#[tokio::test]
async fn test_error_body_carries_message() {
    let state = TestConfig::default().state_at(reference_now());
    let app = doctor_routes(state);

    let response = app
        .oneshot(Request::builder().uri("/77").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("77"));
}

#[tokio::test]
async fn test_unknown_exception_type_is_rejected() {
    let state = TestConfig::default().state_at(reference_now());
    let clinic = seed_clinic(&state, 60).await;
    let app = doctor_routes(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/{}/exceptions", clinic.doctor.id))
                .header("content-type", "application/json")
                .body(Body::from(json!({ "date": "2026-10-20", "type": "holiday" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

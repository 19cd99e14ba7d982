//! Integration test: prediction API endpoints

use axum::body::Body;
use axum::http::{Request, StatusCode};
use progression::artifacts::ArtifactStore;
use progression::dataset::FEATURE_NAMES;
use progression::registry::ModelKind;
use progression::server::{create_router, AppState};
use progression::training::{train, TrainOptions};
use std::sync::Arc;
use tower::ServiceExt;

fn test_app(name: &str) -> axum::Router {
    let dir = std::env::temp_dir().join(format!("progression-server-test-{name}"));
    let _ = std::fs::remove_dir_all(&dir);

    train(&TrainOptions {
        seed: 42,
        model: ModelKind::Ridge,
        artifact_dir: dir.clone(),
    })
    .unwrap();

    let store = ArtifactStore::new(&dir);
    let state = Arc::new(AppState::load(&store).unwrap());
    create_router(state)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn predict_request(body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/predict")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

fn full_record(value: f64) -> serde_json::Value {
    let mut record = serde_json::Map::new();
    for name in FEATURE_NAMES {
        record.insert(name.to_string(), serde_json::json!(value));
    }
    serde_json::Value::Object(record)
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app("health");
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(!json["model_version"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_predict_with_zeroed_record() {
    let app = test_app("predict-zeros");
    let response = app.oneshot(predict_request(&full_record(0.0))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["prediction"].as_f64().unwrap().is_finite());
}

#[tokio::test]
async fn test_predict_ignores_extra_keys() {
    let app = test_app("predict-extra");
    let mut record = full_record(0.0);
    record["not_a_feature"] = serde_json::json!(123.0);

    let response = app.oneshot(predict_request(&record)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_predict_missing_features_are_named() {
    let app = test_app("predict-missing");
    let mut record = full_record(0.0);
    record.as_object_mut().unwrap().remove("bmi");
    record.as_object_mut().unwrap().remove("s5");

    let response = app.oneshot(predict_request(&record)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["status"], "failed");
    let error = json["error"].as_str().unwrap();
    assert!(error.contains("bmi"));
    assert!(error.contains("s5"));
    assert!(!error.contains("age"));
}

#[tokio::test]
async fn test_predict_rejects_non_object_body() {
    let app = test_app("predict-array");
    let response = app
        .oneshot(predict_request(&serde_json::json!([1.0, 2.0])))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["status"], "failed");
}

#[tokio::test]
async fn test_predict_rejects_malformed_json() {
    let app = test_app("predict-malformed");
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/predict")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["status"], "failed");
}

#[tokio::test]
async fn test_predict_rejects_non_numeric_value() {
    let app = test_app("predict-non-numeric");
    let mut record = full_record(0.0);
    record["bmi"] = serde_json::json!("heavy");

    let response = app.oneshot(predict_request(&record)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["status"], "failed");
    assert!(json["error"].as_str().unwrap().contains("bmi"));
}

#[tokio::test]
async fn test_startup_fails_without_artifacts() {
    let dir = std::env::temp_dir().join("progression-server-test-no-artifacts");
    let _ = std::fs::remove_dir_all(&dir);
    let store = ArtifactStore::new(&dir);
    assert!(AppState::load(&store).is_err());
}

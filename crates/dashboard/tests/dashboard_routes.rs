//! Router tests against artifacts loaded from disk

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use house_price_core::{ArtifactPaths, ArtifactStore, RawInputs};
use house_price_dashboard::{build_router, AppState};
use http_body_util::BodyExt;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

fn shipped_models() -> ArtifactPaths {
    ArtifactPaths::in_dir(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../models"))
}

async fn predict(state: Arc<AppState>, raw: &RawInputs) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(raw).unwrap()))
        .unwrap();
    let response = build_router(state).oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_shipped_model_predicts_same_value_twice() {
    let state = Arc::new(AppState::new(ArtifactStore::new(shipped_models())));

    let (status, first) = predict(state.clone(), &RawInputs::default()).await;
    assert_eq!(status, StatusCode::OK);
    let (_, second) = predict(state, &RawInputs::default()).await;

    assert_eq!(first["report"]["prediction"], second["report"]["prediction"]);
    let display = first["report"]["display_price"].as_str().unwrap();
    assert!(display.starts_with('$') && display.ends_with('k'));
}

#[tokio::test]
async fn test_empty_artifact_dir_degrades() {
    let dir = tempfile::TempDir::new().unwrap();
    let state = Arc::new(AppState::new(ArtifactStore::new(ArtifactPaths::in_dir(
        dir.path(),
    ))));

    let (status, body) = predict(state, &RawInputs::default()).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["state"], "idle");
    assert_eq!(body["prediction_enabled"], false);
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let state = Arc::new(AppState::new(ArtifactStore::new(shipped_models())));
    let request = Request::builder()
        .method("POST")
        .uri("/api/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"MedInc": "high"}"#))
        .unwrap();

    let response = build_router(state).oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());
}

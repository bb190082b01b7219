//! Integration tests for the viewer API
//!
//! The router is driven directly with `tower::ServiceExt::oneshot`, without
//! binding a socket.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use radcase::output::save_json;
use radcase::record::CaseRecord;
use radcase::viewer::router;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

fn sample_records() -> Vec<CaseRecord> {
    vec![
        CaseRecord {
            url: "https://radiopaedia.org/cases/1".to_string(),
            title: "Intussusception".to_string(),
            diagnosis: "Ileocolic intussusception".to_string(),
            ..Default::default()
        },
        CaseRecord {
            url: "https://radiopaedia.org/cases/2".to_string(),
            title: "Normal chest".to_string(),
            ..Default::default()
        },
    ]
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn setup() -> (TempDir, axum::Router) {
    let dir = TempDir::new().unwrap();
    let cases_path = dir.path().join("data/cases.json");
    save_json(&sample_records(), &cases_path).unwrap();

    let static_dir = dir.path().join("web");
    std::fs::create_dir_all(&static_dir).unwrap();
    std::fs::write(static_dir.join("index.html"), "<h1>viewer</h1>").unwrap();

    let app = router(cases_path, static_dir);
    (dir, app)
}

#[tokio::test]
async fn test_list_cases() {
    let (_dir, app) = setup();
    let (status, body) = get(app, "/api/cases").await;

    assert_eq!(status, StatusCode::OK);
    let cases = body.as_array().unwrap();
    assert_eq!(cases.len(), 2);
    assert_eq!(cases[0]["title"], "Intussusception");
    assert_eq!(cases[1]["diagnosis"], "");
}

#[tokio::test]
async fn test_case_by_index() {
    let (_dir, app) = setup();
    let (status, body) = get(app, "/api/case/1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["url"], "https://radiopaedia.org/cases/2");
    assert_eq!(body["patientData"], serde_json::json!({}));
}

#[tokio::test]
async fn test_case_out_of_range() {
    let (_dir, app) = setup();
    let (status, body) = get(app, "/api/case/2").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Case not found");
}

#[tokio::test]
async fn test_non_numeric_index_is_not_found() {
    for uri in ["/api/case/abc", "/api/case/-1", "/api/case/1.5"] {
        let (_dir, app) = setup();
        let (status, body) = get(app, uri).await;

        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body["error"], "Case not found");
    }
}

#[tokio::test]
async fn test_missing_case_file_serves_empty_list() {
    let dir = TempDir::new().unwrap();
    let app = router(dir.path().join("missing.json"), dir.path());
    let (status, body) = get(app, "/api/cases").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn test_static_files_served() {
    let (_dir, app) = setup();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/index.html")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"<h1>viewer</h1>");
}

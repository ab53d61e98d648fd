//! HTTP surface tests driven through the router with `tower::ServiceExt`

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use student_records::cache::CacheProvider;
use student_records::config::StudentRecordsConfig;
use student_records::database::InMemoryStudentStore;
use student_records::web::{create_app, AppState};
use tower::ServiceExt;

fn app() -> Router {
    let state = AppState::new(
        StudentRecordsConfig::default(),
        Arc::new(InMemoryStudentStore::new()),
        CacheProvider::noop(),
    );
    create_app(state)
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn student_body(name: &str) -> Value {
    json!({
        "name": name,
        "age": "14",
        "studentClass": "9B",
        "phoneNumber": 5551234
    })
}

async fn create(app: &Router, name: &str) -> Value {
    let (status, body) = send(app, json_request(Method::POST, "/student", student_body(name))).await;
    assert_eq!(status, StatusCode::OK);
    body["data"].clone()
}

#[tokio::test]
async fn test_create_student_returns_persisted_entity() {
    let app = app();

    let (status, body) =
        send(&app, json_request(Method::POST, "/student", student_body("Alice"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "No error Recorded");
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["name"], "Alice");
    assert_eq!(body["data"]["studentClass"], "9B");
    assert_eq!(body["data"]["phoneNumber"], 5551234);
    assert!(body["data"]["createdAt"].is_string());
    assert!(body["data"]["updatedAt"].is_string());
}

#[tokio::test]
async fn test_create_student_reports_every_missing_field() {
    let app = app();

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/student", json!({"name": "   ", "age": "14"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    let fields: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["name", "studentClass", "phoneNumber"]);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Validation failed: name: Name is required"));
}

#[tokio::test]
async fn test_create_student_rejects_malformed_json() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/student")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_get_students_by_name_matches_exactly() {
    let app = app();
    create(&app, "Alice").await;
    create(&app, "Alicia").await;
    create(&app, "Alice").await;

    let (status, body) = send(&app, empty_request(Method::GET, "/student/Alice")).await;

    assert_eq!(status, StatusCode::OK);
    let students = body["data"].as_array().unwrap();
    assert_eq!(students.len(), 2);
    assert_eq!(students[0]["id"], 1);
    assert_eq!(students[1]["id"], 3);
    assert_eq!(students[0]["phoneNumber"], "5551234");
    assert!(students[0].get("createdAt").is_none());

    let (status, body) = send(&app, empty_request(Method::GET, "/student/Nobody")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_list_students_pages_and_filters() {
    let app = app();
    for name in ["Alice", "Bob", "Carol", "Dan", "Eve"] {
        create(&app, name).await;
    }

    let (status, body) = send(
        &app,
        empty_request(Method::GET, "/student/all?limit=2&offset=0"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![5, 4]);

    let (_, body) = send(
        &app,
        empty_request(Method::GET, "/student/all?limit=10&offset=0&name=CAR"),
    )
    .await;
    let students = body["data"].as_array().unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0]["name"], "Carol");
}

#[tokio::test]
async fn test_list_students_requires_valid_paging() {
    let app = app();

    let (status, body) = send(&app, empty_request(Method::GET, "/student/all?limit=2")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, body) = send(
        &app,
        empty_request(Method::GET, "/student/all?limit=-1&offset=0"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"][0]["field"], "limit");
}

#[tokio::test]
async fn test_delete_student() {
    let app = app();
    create(&app, "Alice").await;

    let (status, body) = send(&app, empty_request(Method::DELETE, "/student/1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], true);

    let (status, body) = send(&app, empty_request(Method::DELETE, "/student/1")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Student Record is not deleted or not found");

    let (status, body) = send(&app, empty_request(Method::DELETE, "/student/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["data"][0]["field"], "id");
}

#[tokio::test]
async fn test_update_student() {
    let app = app();
    create(&app, "Alice").await;

    let (status, body) = send(
        &app,
        json_request(Method::PUT, "/student/1", student_body("Bob")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], true);

    let (_, body) = send(&app, empty_request(Method::GET, "/student/Bob")).await;
    assert_eq!(body["data"][0]["id"], 1);

    let (status, body) = send(
        &app,
        json_request(Method::PUT, "/student/999", student_body("Bob")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Student record not found");
}

#[tokio::test]
async fn test_health_and_readiness() {
    let app = app();

    let (status, body) = send(&app, empty_request(Method::GET, "/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, empty_request(Method::GET, "/ready")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["store"]["status"], "healthy");
    assert_eq!(body["checks"]["cache"]["status"], "healthy");
}

#[tokio::test]
async fn test_request_id_is_echoed_or_generated() {
    let app = app();

    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "trace-abc-123")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "trace-abc-123");

    let response = app
        .clone()
        .oneshot(empty_request(Method::GET, "/health"))
        .await
        .unwrap();
    let generated = response.headers()["x-request-id"].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(generated).is_ok());
}

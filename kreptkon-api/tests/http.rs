//! Router-level tests that run without a live Postgres.
//!
//! The pool is created lazily, so every path exercised here (routing,
//! validation, introspection endpoints, response shaping) never opens a
//! database connection.

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
};
use kreptkon_api::{
    pod::PodInfo, repository::UserRepository, routes::create_http_router, AppState, Config,
};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

fn test_state(config: Config) -> AppState {
    let pool = PgPoolOptions::new()
        .connect_lazy(&config.database.url)
        .expect("database url parses");
    let pod = PodInfo {
        pod_name: "test-pod".to_string(),
        pod_ip: "10.0.0.1".to_string(),
    };
    AppState::new(config, pod, UserRepository::new(pool))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    serde_json::from_slice(&bytes).expect("body is json")
}

#[tokio::test]
async fn hello_includes_pod_identity() {
    let app = create_http_router(test_state(Config::default()));

    let response = app.oneshot(get("/hello")).await.expect("request succeeds");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Hello from kreptkon!");
    assert_eq!(body["pod_name"], "test-pod");
    assert_eq!(body["pod_ip"], "10.0.0.1");
}

#[tokio::test]
async fn status_reports_version_and_environment() {
    let app = create_http_router(test_state(Config::default()));

    let response = app.oneshot(get("/status")).await.expect("request succeeds");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["version"], "1.0");
    assert_eq!(body["environment"], "dev");
    assert_eq!(body["pod_name"], "test-pod");
}

#[tokio::test]
async fn health_is_ok() {
    let app = create_http_router(test_state(Config::default()));

    let response = app.oneshot(get("/health")).await.expect("request succeeds");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "kreptkon-api");
}

#[tokio::test]
async fn demo_data_lists_canned_users() {
    let app = create_http_router(test_state(Config::default()));

    let response = app.oneshot(get("/data")).await.expect("request succeeds");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let users = body["users"].as_array().expect("users array");
    assert_eq!(users.len(), 3);
    assert_eq!(users[0]["name"], "Alice");
    assert_eq!(users[0]["role"], "admin");
    assert_eq!(users[2]["name"], "Charlie");
}

#[tokio::test]
async fn demo_data_is_not_routed_when_disabled() {
    let mut config = Config::default();
    config.features.demo_data = false;
    let app = create_http_router(test_state(config));

    let response = app.oneshot(get("/data")).await.expect("request succeeds");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn config_reports_presence_flags_only() {
    let mut config = Config::default();
    config.secret_key = Some("hunter2".to_string());
    let app = create_http_router(test_state(config));

    let response = app.oneshot(get("/config")).await.expect("request succeeds");
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    let raw = String::from_utf8(bytes.to_vec()).expect("utf8 body");
    assert!(!raw.contains("hunter2"), "secret value must never leak");
    assert!(!raw.contains("password"), "database url must never leak");

    let body: Value = serde_json::from_str(&raw).expect("body is json");
    assert_eq!(body["secret_key_set"], true);
    assert_eq!(body["database_url_set"], true);
    assert_eq!(body["environment"], "dev");
    assert_eq!(body["log_level"], "info");
    assert_eq!(body["features"]["demo_data"], true);
}

#[tokio::test]
async fn config_without_secret_reports_absence() {
    let app = create_http_router(test_state(Config::default()));

    let response = app.oneshot(get("/config")).await.expect("request succeeds");
    let body = body_json(response).await;
    assert_eq!(body["secret_key_set"], false);
}

#[tokio::test]
async fn create_user_with_empty_payload_is_400() {
    let app = create_http_router(test_state(Config::default()));

    let response = app
        .oneshot(post_json("/users", json!({})))
        .await
        .expect("request succeeds");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    let message = body["error"].as_str().expect("error message");
    assert!(message.contains("username"));
    assert!(message.contains("email"));
}

#[tokio::test]
async fn create_user_with_missing_email_names_the_field() {
    let app = create_http_router(test_state(Config::default()));

    let response = app
        .oneshot(post_json("/users", json!({"username": "alice"})))
        .await
        .expect("request succeeds");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    let message = body["error"].as_str().expect("error message");
    assert!(message.contains("email"));
    assert!(!message.contains("username"));
}

#[tokio::test]
async fn create_user_with_empty_strings_is_400() {
    let app = create_http_router(test_state(Config::default()));

    let response = app
        .oneshot(post_json("/users", json!({"username": "", "email": ""})))
        .await
        .expect("request succeeds");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_user_with_oversized_username_is_400() {
    let app = create_http_router(test_state(Config::default()));

    let response = app
        .oneshot(post_json(
            "/users",
            json!({"username": "a".repeat(81), "email": "a@example.com"}),
        ))
        .await
        .expect("request succeeds");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_user_with_invalid_email_is_400() {
    let app = create_http_router(test_state(Config::default()));

    let response = app
        .oneshot(post_json(
            "/users",
            json!({"username": "alice", "email": "not-an-email"}),
        ))
        .await
        .expect("request succeeds");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_integer_user_id_is_400() {
    let app = create_http_router(test_state(Config::default()));

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/users/abc")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("request succeeds");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use skipstore::{api::create_router, AppState, SkipStore, StoreOptions};

// == Helper Functions ==

fn create_test_app() -> Router {
    let store = SkipStore::new(8);
    let state = AppState::new(store);
    create_router(state)
}

fn create_file_backed_app(dir: &TempDir) -> Router {
    let store = SkipStore::with_options(StoreOptions {
        store_file: dir.path().join("dumpFile"),
        ..StoreOptions::default()
    });
    create_router(AppState::new(store))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn set_request(key: &str, value: &str) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri("/set")
        .header("content-type", "application/json")
        .body(Body::from(format!(
            r#"{{"key":"{key}","value":"{value}"}}"#
        )))
        .unwrap()
}

fn expire_request(key: &str, seconds: u64) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri("/expire")
        .header("content-type", "application/json")
        .body(Body::from(format!(
            r#"{{"key":"{key}","seconds":{seconds}}}"#
        )))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

// == SET Endpoint Tests ==

#[tokio::test]
async fn test_set_endpoint_success() {
    let app = create_test_app();

    let response = app.oneshot(set_request("test_key", "test_value")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["outcome"].as_str().unwrap(), "inserted");
    assert!(json["message"].as_str().unwrap().contains("test_key"));
}

#[tokio::test]
async fn test_set_endpoint_reports_update() {
    let app = create_test_app();

    let response = app
        .clone()
        .oneshot(set_request("dup", "one"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(set_request("dup", "two")).await.unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["outcome"].as_str().unwrap(), "updated");
}

#[tokio::test]
async fn test_set_endpoint_rejects_empty_key() {
    let app = create_test_app();

    let response = app.oneshot(set_request("", "value")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// == GET Endpoint Tests ==

#[tokio::test]
async fn test_get_endpoint_success() {
    let app = create_test_app();

    let set_response = app
        .clone()
        .oneshot(set_request("get_key", "get_value"))
        .await
        .unwrap();
    assert_eq!(set_response.status(), StatusCode::OK);

    let get_response = app.oneshot(get_request("/get/get_key")).await.unwrap();

    assert_eq!(get_response.status(), StatusCode::OK);
    let json = body_to_json(get_response.into_body()).await;
    assert_eq!(json["key"].as_str().unwrap(), "get_key");
    assert_eq!(json["value"].as_str().unwrap(), "get_value");
}

#[tokio::test]
async fn test_get_endpoint_not_found() {
    let app = create_test_app();

    let response = app
        .oneshot(get_request("/get/nonexistent_key"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_to_json(response.into_body()).await;
    assert!(json.get("error").is_some());
}

// == DELETE Endpoint Tests ==

#[tokio::test]
async fn test_delete_endpoint_success() {
    let app = create_test_app();

    app.clone()
        .oneshot(set_request("to_delete", "value"))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/del/to_delete")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get_request("/get/to_delete")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_endpoint_absent_key_not_found() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/del/ghost")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// == EXPIRE / TTL Endpoint Tests ==

#[tokio::test]
async fn test_expire_then_ttl_reports_live() {
    let app = create_test_app();

    app.clone()
        .oneshot(set_request("volatile", "v"))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(expire_request("volatile", 60))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get_request("/ttl/volatile")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"].as_str().unwrap(), "live");
    assert!(json["remaining"].as_u64().unwrap() <= 60);
}

#[tokio::test]
async fn test_expire_endpoint_missing_key() {
    let app = create_test_app();

    let response = app.oneshot(expire_request("ghost", 60)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_ttl_endpoint_persistent_key() {
    let app = create_test_app();

    app.clone()
        .oneshot(set_request("stable", "v"))
        .await
        .unwrap();

    let response = app.oneshot(get_request("/ttl/stable")).await.unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"].as_str().unwrap(), "persistent");
}

// == STATS Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint_counts() {
    let app = create_test_app();

    for key in ["a", "b", "c"] {
        app.clone().oneshot(set_request(key, "v")).await.unwrap();
    }
    app.clone().oneshot(expire_request("a", 60)).await.unwrap();

    let response = app.oneshot(get_request("/stats")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["elements"].as_u64().unwrap(), 3);
    assert_eq!(json["volatile_entries"].as_u64().unwrap(), 1);
    assert_eq!(json["volatile_capacity"].as_u64().unwrap(), 8);
}

// == Snapshot Endpoint Tests ==

#[tokio::test]
async fn test_dump_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let app = create_file_backed_app(&dir);

    for (key, value) in [("1", "a"), ("2", "b"), ("3", "c")] {
        app.clone().oneshot(set_request(key, value)).await.unwrap();
    }

    let response = app.clone().oneshot(post_request("/dump")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["records"].as_u64().unwrap(), 3);

    // a fresh server backed by the same file sees the snapshot
    let fresh = create_file_backed_app(&dir);
    let response = fresh.clone().oneshot(post_request("/load")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["records"].as_u64().unwrap(), 3);

    let response = fresh.oneshot(get_request("/get/2")).await.unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["value"].as_str().unwrap(), "b");
}

#[tokio::test]
async fn test_load_endpoint_missing_file_is_server_error() {
    let dir = TempDir::new().unwrap();
    let app = create_file_backed_app(&dir);

    let response = app.oneshot(post_request("/load")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// == HEALTH Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let response = app.oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"].as_str().unwrap(), "healthy");
}

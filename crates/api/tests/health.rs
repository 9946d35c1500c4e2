//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use candy_core::candy::{CandyItemPatch, NewCandyItem};
use candy_core::types::DbId;
use candy_db::models::candy_item::CandyItem;
use candy_db::store::{CandyStore, NullCandyStore, StorageBackend, StoreError};
use common::{body_json, delete, get, post_json, put_json};
use serde_json::{json, Value};

/// A store whose every call fails as if the database were down.
struct UnreachableStore;

#[async_trait]
impl CandyStore for UnreachableStore {
    fn backend(&self) -> StorageBackend {
        StorageBackend::Postgres
    }

    async fn list(&self) -> Result<Vec<CandyItem>, StoreError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn get(&self, _id: DbId) -> Result<CandyItem, StoreError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn create(&self, _input: &NewCandyItem) -> Result<CandyItem, StoreError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn update(&self, _id: DbId, _patch: &CandyItemPatch) -> Result<CandyItem, StoreError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn delete(&self, _id: DbId) -> Result<(), StoreError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }
}

// ---------------------------------------------------------------------------
// Test: GET /health returns 200 with expected JSON fields
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_returns_ok_with_json() {
    let app = common::build_test_app(common::memory_store());
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "OK");
    assert_eq!(json["database"], "connected");
    assert_eq!(json["backend"], "memory");
    assert!(json["timestamp"].is_string());
    assert!(json.get("error").is_none());
}

#[tokio::test]
async fn health_check_reports_offline_mode() {
    let app = common::build_test_app(Arc::new(NullCandyStore));
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["database"], "offline");
    assert_eq!(json["backend"], "offline");
}

#[tokio::test]
async fn health_check_returns_500_when_storage_is_down() {
    let app = common::build_test_app(Arc::new(UnreachableStore));
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ERROR");
    assert_eq!(json["database"], "disconnected");
    assert!(json["timestamp"].is_string());
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn storage_failure_on_list_returns_500() {
    let app = common::build_test_app(Arc::new(UnreachableStore));
    let response = get(app, "/items").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "STORAGE_UNAVAILABLE");
    assert!(json["error"].is_string());
}

/// Assert a 500 storage failure body that carries no driver text.
async fn assert_storage_unavailable(response: Response) {
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = body_json(response).await;
    assert_eq!(json["code"], "STORAGE_UNAVAILABLE");
    let message = json["error"].as_str().unwrap();
    assert!(!message.contains("pool timed out"), "leaked: {message}");
    assert!(!message.to_lowercase().contains("sqlx"), "leaked: {message}");
}

#[tokio::test]
async fn storage_failure_on_create_returns_500() {
    let app = common::build_test_app(Arc::new(UnreachableStore));
    let body = json!({
        "name": "Jordbær",
        "color": "Rød",
        "weightGrams": 11,
        "flavorType": "Jordbær"
    });
    assert_storage_unavailable(post_json(app, "/items", body).await).await;
}

#[tokio::test]
async fn storage_failure_on_get_and_update_returns_500() {
    let store: Arc<dyn CandyStore> = Arc::new(UnreachableStore);

    let response = get(common::build_test_app(store.clone()), "/items/1").await;
    assert_storage_unavailable(response).await;

    let response = put_json(
        common::build_test_app(store),
        "/items/1",
        json!({"color": "Pink"}),
    )
    .await;
    assert_storage_unavailable(response).await;
}

#[tokio::test]
async fn storage_failure_on_delete_returns_500() {
    let app = common::build_test_app(Arc::new(UnreachableStore));
    assert_storage_unavailable(delete(app, "/items/1").await).await;
}

// ---------------------------------------------------------------------------
// Test: Unknown route returns 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = common::build_test_app(common::memory_store());
    let response = get(app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: x-request-id header is present in response
// ---------------------------------------------------------------------------

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let app = common::build_test_app(common::memory_store());
    let response = get(app, "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");

    // The value should be a valid UUID (36 chars with hyphens).
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

// ---------------------------------------------------------------------------
// Test: CORS preflight OPTIONS request returns correct headers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cors_preflight_returns_correct_headers() {
    let app = common::build_test_app(common::memory_store());

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/items")
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "POST")
        .header("Access-Control-Request-Headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = common::send(app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    let allow_origin = headers
        .get("access-control-allow-origin")
        .expect("Missing Access-Control-Allow-Origin header")
        .to_str()
        .unwrap();
    assert_eq!(allow_origin, "http://localhost:5173");

    let allow_methods = headers
        .get("access-control-allow-methods")
        .expect("Missing Access-Control-Allow-Methods header")
        .to_str()
        .unwrap();
    assert!(
        allow_methods.contains("POST"),
        "Allow-Methods should contain POST, got: {allow_methods}"
    );
}

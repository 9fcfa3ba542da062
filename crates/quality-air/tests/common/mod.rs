//! Shared setup for API integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, header};
use axum::response::Response;
use serde_json::Value;
use tower::ServiceExt;

use quality_air::api::{AppState, create_router};
use quality_air::config::ApiConfig;
use quality_air::db::Database;
use quality_air::user::{UserRepository, UserService};

/// Build a router over a fresh in-memory database, seeded like a real boot.
pub async fn test_app() -> Router {
    test_app_with(ApiConfig::default()).await
}

pub async fn test_app_with(api: ApiConfig) -> Router {
    let database = Database::in_memory().await.unwrap();
    let users = UserService::new(UserRepository::new(database.pool().clone()));
    users.initialize_defaults().await.unwrap();
    create_router(AppState::new(users, api))
}

/// Send a request with an optional JSON body.
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

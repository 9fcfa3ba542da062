//! API route definitions.

use axum::http::Method;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::handlers;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/user",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route("/user/login", post(handlers::login))
        .route(
            "/user/{id}",
            get(handlers::get_user).put(handlers::update_user),
        )
        .layer(build_cors_layer())
        .layer(trace_layer)
        .with_state(state)
}

/// Every origin and header is allowed; no endpoint is guarded.
fn build_cors_layer() -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::PUT, Method::OPTIONS];

    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(methods)
        .allow_headers(Any)
}

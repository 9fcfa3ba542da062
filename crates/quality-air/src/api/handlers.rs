//! HTTP request handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;
use tracing::{info, instrument};

use crate::user::{LoginQuery, LoginResponse, User};

use super::error::{ApiError, ApiResult};
use super::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// List all active users.
#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = state.users.list_active().await?;
    info!(count = users.len(), "Listed users");
    Ok(Json(users))
}

/// Create a new user.
#[instrument(skip(state, user), fields(nick_name = %user.nick_name))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(user): Json<User>,
) -> ApiResult<Json<User>> {
    let user = state.users.insert(user).await?;
    Ok(Json(user))
}

/// Replace a user. The id in the path wins over any id in the body.
#[instrument(skip(state, user))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(user): Json<User>,
) -> ApiResult<Json<User>> {
    let user = state.users.update(user.with_id(id)).await?;
    Ok(Json(user))
}

/// Get a user by id.
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Option<User>>> {
    match state.users.get_by_id(id).await? {
        Some(user) => Ok(Json(Some(user))),
        None if state.api.missing_user_as_null => Ok(Json(None)),
        None => Err(ApiError::not_found(format!("User {} not found", id))),
    }
}

/// Check credentials passed as query parameters.
///
/// Always answers 200; callers read `status` to tell a valid login apart.
#[instrument(skip(state, query), fields(identifier = %query.identifier))]
pub async fn login(
    State(state): State<AppState>,
    Query(query): Query<LoginQuery>,
) -> ApiResult<Json<LoginResponse>> {
    let status = state.users.login(&query.identifier, &query.password).await?;
    Ok(Json(LoginResponse { status }))
}

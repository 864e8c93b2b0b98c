use axum::extract::{Path, State};
use serde::Deserialize;
use uuid::Uuid;

use crate::middleware::{ApiResponse, ApiResult};
use crate::store::User;

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct UserPayload {
    pub name: String,
    pub email: String,
}

/// GET /api/users - list all users
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    let users = state.users.list_users().await?;
    Ok(ApiResponse::success(users))
}

/// GET /api/users/:id - show a single user
pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<User> {
    let user = state.users.get_user(id).await?;
    Ok(ApiResponse::success(user))
}

/// POST /api/users - create a user
pub async fn create(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<UserPayload>,
) -> ApiResult<User> {
    let user = state.users.create_user(payload.name, payload.email).await?;
    Ok(ApiResponse::created(user))
}

/// PUT /api/users/:id - update a user
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<UserPayload>,
) -> ApiResult<User> {
    let user = state
        .users
        .update_user(id, payload.name, payload.email)
        .await?;
    Ok(ApiResponse::success(user))
}

/// DELETE /api/users/:id - delete a user
pub async fn delete(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<User> {
    let user = state.users.delete_user(id).await?;
    Ok(ApiResponse::success(user))
}

//! HTTP handlers for the user resource

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::error::Result;
use crate::models::user::{CreateUserRequest, User};
use crate::AppState;

/// List all users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    let users = state.users.list().await?;
    tracing::debug!("returning {} users", users.len());
    Ok(Json(users))
}

/// Create a new user.
///
/// The payload is validated before the store is touched; a constraint
/// violation on insert is rolled back and reported with its cause.
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>)> {
    let new_user = payload.validate()?;
    let user = state.users.create(new_user).await?;
    tracing::info!("created user {} ({})", user.id, user.username);
    Ok((StatusCode::CREATED, Json(user)))
}

/// Get a user by id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<User>> {
    let user = state.users.get(id).await?;
    Ok(Json(user))
}

/// Delete a user by id
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    state.users.delete(id).await?;
    tracing::info!("deleted user {id}");
    Ok(StatusCode::NO_CONTENT)
}

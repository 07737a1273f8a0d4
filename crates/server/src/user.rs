//! User API endpoints: registration, login and account management.

use api_types::{
    Message,
    user::{Credentials, LoginResponse, UserListResponse, UserView},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{ServerError, extract::ApiJson, server::ServerState};

fn map_user(user: engine::User) -> UserView {
    UserView {
        id: user.id,
        username: user.username,
    }
}

pub async fn register(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<Credentials>,
) -> Result<(StatusCode, Json<Message>), ServerError> {
    let user_id = state
        .engine
        .register_user(&payload.username, &payload.password)
        .await?;
    tracing::info!(user_id, "new user registered");

    Ok((
        StatusCode::CREATED,
        Json(Message::ok("User registered successfully")),
    ))
}

pub async fn login(
    State(state): State<ServerState>,
    ApiJson(payload): ApiJson<Credentials>,
) -> Result<Json<LoginResponse>, ServerError> {
    let user = state
        .engine
        .authenticate(&payload.username, &payload.password)
        .await?;

    Ok(Json(LoginResponse {
        user_id: user.id,
        username: user.username,
    }))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(user_id): Path<i32>,
) -> Result<Json<UserView>, ServerError> {
    let user = state.engine.user(user_id).await?;
    Ok(Json(map_user(user)))
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<UserListResponse>, ServerError> {
    let data = state
        .engine
        .users()
        .await?
        .into_iter()
        .map(map_user)
        .collect();

    Ok(Json(UserListResponse {
        success: true,
        message: "Users retrieved successfully".to_string(),
        data,
    }))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(user_id): Path<i32>,
    ApiJson(payload): ApiJson<Credentials>,
) -> Result<Json<Message>, ServerError> {
    state
        .engine
        .update_user(user_id, &payload.username, &payload.password)
        .await?;
    Ok(Json(Message::ok("User updated successfully")))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(user_id): Path<i32>,
) -> Result<Json<Message>, ServerError> {
    state.engine.delete_user(user_id).await?;
    Ok(Json(Message::ok("User deleted successfully")))
}

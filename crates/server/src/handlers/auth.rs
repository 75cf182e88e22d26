//! User and login handlers

use crate::config::AppState;
use crate::error::Result;
use crate::extract::ApiJson;
use crate::models::{LoginRequest, LoginResponse, NewUser, UserInfo};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::{info, warn};

/// GET /api/users
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserInfo>>> {
    info!("GET /api/users");
    let users = state.auth.list_users().await?;
    Ok(Json(users))
}

/// GET /api/users/{id}
pub async fn get_user(
    Path(user_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UserInfo>> {
    info!("GET /api/users/{}", user_id);
    let user = state.auth.get_user(&user_id).await?;
    Ok(Json(user))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewUser>,
) -> Result<(StatusCode, Json<UserInfo>)> {
    info!("POST /api/users - {:?}", req.username);

    match state.auth.register(req).await {
        Ok(user) => Ok((StatusCode::CREATED, Json(user))),
        Err(e) => {
            warn!("User creation failed: {}", e);
            Err(e)
        }
    }
}

/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    info!("POST /api/login - {}", req.username);
    let response = state.auth.login(&req.username, &req.password).await?;
    Ok(Json(response))
}

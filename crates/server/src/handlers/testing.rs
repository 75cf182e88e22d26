//! Test-support routes, mounted only when `enable_testing` is set

use crate::config::AppState;
use crate::error::Result;
use axum::{extract::State, http::StatusCode};
use tracing::warn;

/// POST /api/testing/reset
pub async fn reset(State(state): State<AppState>) -> Result<StatusCode> {
    let blogs = state.blogs.delete_all().await?;
    let users = state.auth.delete_all().await?;
    warn!("[Testing] Reset: removed {} blogs and {} users", blogs, users);
    Ok(StatusCode::NO_CONTENT)
}

use crate::config::AppState;
use crate::error::Result;
use crate::stats::{summarize, BlogStats};
use axum::{extract::State, Json};
use tracing::info;

/// GET /api/stats
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<BlogStats>> {
    info!("GET /api/stats");
    let blogs = state.blogs.list().await?;
    Ok(Json(summarize(&blogs)))
}

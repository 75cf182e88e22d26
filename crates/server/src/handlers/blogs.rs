//! Blog handlers
//!
//! Reads are public. Create, update and delete run behind
//! `mw_require_auth` and receive the caller as `Ctx`.

use crate::config::AppState;
use crate::ctx::Ctx;
use crate::error::Result;
use crate::extract::ApiJson;
use crate::models::{Blog, BlogUpdate, NewBlog};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

/// GET /api/blogs
pub async fn list_blogs(State(state): State<AppState>) -> Result<Json<Vec<Blog>>> {
    info!("GET /api/blogs");
    let blogs = state.blogs.list().await?;
    Ok(Json(blogs))
}

/// GET /api/blogs/{id}
pub async fn get_blog(
    Path(blog_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Blog>> {
    info!("GET /api/blogs/{}", blog_id);
    let blog = state.blogs.get(&blog_id).await?;
    Ok(Json(blog))
}

/// POST /api/blogs
pub async fn create_blog(
    State(state): State<AppState>,
    ctx: Ctx,
    ApiJson(input): ApiJson<NewBlog>,
) -> Result<(StatusCode, Json<Blog>)> {
    info!("POST /api/blogs - {}", ctx.username());
    let blog = state.blogs.create(input, &ctx).await?;
    Ok((StatusCode::CREATED, Json(blog)))
}

/// PUT /api/blogs/{id}
pub async fn update_blog(
    Path(blog_id): Path<String>,
    State(state): State<AppState>,
    ctx: Ctx,
    ApiJson(patch): ApiJson<BlogUpdate>,
) -> Result<Json<Blog>> {
    info!("PUT /api/blogs/{} - {}", blog_id, ctx.username());
    let blog = state.blogs.update(&blog_id, patch).await?;
    Ok(Json(blog))
}

/// DELETE /api/blogs/{id}
pub async fn delete_blog(
    Path(blog_id): Path<String>,
    State(state): State<AppState>,
    ctx: Ctx,
) -> Result<StatusCode> {
    info!("DELETE /api/blogs/{} - {}", blog_id, ctx.username());
    state.blogs.delete(&blog_id, &ctx).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Router assembly
//!
//! Public read routes and auth-protected mutation routes share paths,
//! so the two groups are built separately and merged.

use crate::auth::middleware::mw_require_auth;
use crate::config::AppState;
use crate::handlers;
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn router(state: AppState) -> Router {
    let public = Router::new()
        .route("/api/blogs", get(handlers::list_blogs))
        .route("/api/blogs/{id}", get(handlers::get_blog))
        .route("/api/stats", get(handlers::get_stats))
        .route(
            "/api/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route("/api/users/{id}", get(handlers::get_user))
        .route("/api/login", post(handlers::login));

    let protected = Router::new()
        .route("/api/blogs", post(handlers::create_blog))
        .route(
            "/api/blogs/{id}",
            put(handlers::update_blog).delete(handlers::delete_blog),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            mw_require_auth,
        ));

    let mut app = public.merge(protected);

    if state.config.enable_testing {
        app = app.route("/api/testing/reset", post(handlers::reset));
    }

    app.fallback(handlers::unknown_endpoint)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

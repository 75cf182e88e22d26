//! Bloglist Server Library
//!
//! Blog CRUD, user accounts, and JWT-authorized mutations over SQLite.

pub mod auth;
pub mod blogs;
pub mod config;
pub mod ctx;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod router;
pub mod stats;

use std::sync::Arc;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use auth::AuthManager;
use blogs::BlogManager;
use config::{AppState, ServerConfig};

pub use router::router;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bloglist_server=debug,tower_http=info,info".into());

    // Already set (e.g. by a test harness), ignore
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Open the database and wire managers into shared state
pub async fn build_state(config: ServerConfig) -> anyhow::Result<AppState> {
    let pool = db::connect(&config.database_url).await?;

    let auth = Arc::new(AuthManager::new(pool.clone(), &config));
    info!("Auth Manager initialized");

    let blogs = Arc::new(BlogManager::new(pool));
    info!("Blog Manager initialized");

    Ok(AppState {
        config,
        auth,
        blogs,
    })
}

pub async fn run() -> anyhow::Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    init_tracing();

    info!("=== Bloglist Server ===");

    let config = ServerConfig::from_env()?;
    let addr = config.bind_addr;

    if config.enable_testing {
        info!("Testing routes enabled");
    }

    let state = build_state(config).await?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Bloglist Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

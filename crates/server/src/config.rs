//! Bloglist server configuration

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::auth::AuthManager;
use crate::blogs::BlogManager;

/// Configuration for the Bloglist Server
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub bind_addr: SocketAddr,
    /// sqlx connection string for the SQLite database
    pub database_url: String,
    /// HMAC secret used to sign login tokens
    pub secret: String,
    /// Lifetime of issued tokens in seconds
    pub token_ttl_secs: i64,
    /// bcrypt work factor for password hashes
    pub bcrypt_cost: u32,
    /// Mount the `/api/testing` routes
    pub enable_testing: bool,
}

impl ServerConfig {
    /// Config with defaults for everything except the signing secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3003)),
            database_url: "sqlite://bloglist.sqlite".to_string(),
            secret: secret.into(),
            token_ttl_secs: 60 * 60,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            enable_testing: false,
        }
    }

    /// Load configuration from the process environment.
    ///
    /// `SECRET` is required; every other variable falls back to a default.
    /// `BLOGLIST_TESTING` accepts `true`/`false`, `1`/`0` and `yes`/`no`.
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var("SECRET").context("SECRET must be set")?;
        let mut config = Self::new(secret);

        let host = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = env_parse("PORT")?.unwrap_or(3003);
        config.bind_addr = format!("{}:{}", host, port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", host, port))?;

        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database_url = url;
        }
        if let Some(ttl) = env_parse("TOKEN_TTL_SECS")? {
            config.token_ttl_secs = ttl;
        }
        if let Some(cost) = env_parse("BCRYPT_COST")? {
            config.bcrypt_cost = cost;
        }
        if let Ok(raw) = std::env::var("BLOGLIST_TESTING") {
            config.enable_testing = parse_flag(&raw)
                .with_context(|| format!("Invalid value for BLOGLIST_TESTING: {:?}", raw))?;
        }

        Ok(config)
    }
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .with_context(|| format!("Invalid value for {}: {:?}", key, raw)),
        Err(_) => Ok(None),
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => anyhow::bail!("expected a boolean flag, got {:?}", other),
    }
}

/// App state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
    pub auth: Arc<AuthManager>,
    pub blogs: Arc<BlogManager>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_accept_numeric_and_word_forms() {
        for raw in ["1", "true", "TRUE", "yes", " on "] {
            assert!(parse_flag(raw).unwrap(), "{:?}", raw);
        }
        for raw in ["0", "false", "No", "off", ""] {
            assert!(!parse_flag(raw).unwrap(), "{:?}", raw);
        }
    }

    #[test]
    fn unknown_flag_value_is_an_error() {
        assert!(parse_flag("maybe").is_err());
    }
}

//! Authentication Module
//!
//! Handles user registration, login, and token issuing/verification.
//! Users live in the same SQLite database as blogs.

pub mod middleware;

use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::collections::HashMap;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::error::{Error, Result};
use crate::models::{BlogSummary, LoginResponse, NewUser, User, UserInfo};

const MIN_USERNAME_LEN: usize = 3;
const MIN_PASSWORD_LEN: usize = 3;

/// Claims carried by a login token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    pub id: String,
    pub exp: usize,
}

/// Auth manager handles all authentication
pub struct AuthManager {
    pool: SqlitePool,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl: Duration,
    bcrypt_cost: u32,
}

impl AuthManager {
    pub fn new(pool: SqlitePool, config: &ServerConfig) -> Self {
        Self {
            pool,
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            token_ttl: Duration::seconds(config.token_ttl_secs),
            bcrypt_cost: config.bcrypt_cost,
        }
    }

    /// Register a new user
    pub async fn register(&self, new_user: NewUser) -> Result<UserInfo> {
        let password = match new_user.password.as_deref() {
            None | Some("") => return Err(Error::Validation("password missing".to_string())),
            Some(p) if p.chars().count() < MIN_PASSWORD_LEN => {
                return Err(Error::Validation("password too short".to_string()))
            }
            Some(p) => p,
        };

        let username = match new_user.username.as_deref().map(str::trim) {
            None | Some("") => {
                return Err(Error::Validation(
                    "User validation failed: username: A username is required".to_string(),
                ))
            }
            Some(u) if u.chars().count() < MIN_USERNAME_LEN => {
                return Err(Error::Validation(format!(
                    "User validation failed: username: Path `username` (`{}`) is shorter than the minimum allowed length ({}).",
                    u, MIN_USERNAME_LEN
                )))
            }
            Some(u) => u.to_string(),
        };

        let password_hash = hash(password, self.bcrypt_cost)?;

        let user = User {
            id: Uuid::new_v4().to_string(),
            username,
            name: new_user.name,
            password_hash,
        };

        sqlx::query(
            "INSERT INTO users (id, username, name, password_hash, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.name)
        .bind(&user.password_hash)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error().is_some_and(|db| db.is_unique_violation()) {
                Error::DuplicateUsername
            } else {
                Error::Database(e)
            }
        })?;

        info!("[Auth] User registered: {}", user.username);

        Ok(user.into_info(Vec::new()))
    }

    /// Check credentials and issue a token
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let user = self
            .find_by_username(username)
            .await?
            .ok_or(Error::InvalidCredentials)?;

        if !verify(password, &user.password_hash)? {
            warn!("[Auth] Failed login attempt for {}", username);
            return Err(Error::InvalidCredentials);
        }

        let token = self.issue_token(&user)?;

        info!("[Auth] User logged in: {}", user.username);

        Ok(LoginResponse {
            token,
            username: user.username,
            name: user.name,
        })
    }

    /// Sign a token for `user`
    pub fn issue_token(&self, user: &User) -> Result<String> {
        let exp = Utc::now()
            .checked_add_signed(self.token_ttl)
            .ok_or_else(|| Error::Internal("token expiry out of range".to_string()))?
            .timestamp();

        let claims = Claims {
            username: user.username.clone(),
            id: user.id.clone(),
            exp: exp as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(Error::Token)
    }

    /// Verify signature and expiry of `token`
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        use jsonwebtoken::errors::ErrorKind;

        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default()).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => Error::TokenExpired,
                _ => Error::TokenInvalid,
            },
        )?;

        if data.claims.id.is_empty() {
            return Err(Error::TokenClaimsInvalid);
        }

        Ok(data.claims)
    }

    /// Get a user record by id
    pub async fn find_user(&self, user_id: &str) -> Result<Option<User>> {
        let row: Option<(String, String, Option<String>, String)> = sqlx::query_as(
            "SELECT id, username, name, password_hash FROM users WHERE id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(user_from_row))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let row: Option<(String, String, Option<String>, String)> = sqlx::query_as(
            "SELECT id, username, name, password_hash FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(user_from_row))
    }

    /// Get public info for a user, including their blogs
    pub async fn get_user(&self, user_id: &str) -> Result<UserInfo> {
        Uuid::parse_str(user_id).map_err(|_| Error::MalformattedId)?;

        let user = self.find_user(user_id).await?.ok_or(Error::UserNotFound)?;

        let rows: Vec<(String, String, String, String)> = sqlx::query_as(
            "SELECT id, title, author, url FROM blogs WHERE user_id = ? ORDER BY rowid",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let blogs = rows.into_iter().map(summary_from_row).collect();

        Ok(user.into_info(blogs))
    }

    /// List all users with their blogs
    pub async fn list_users(&self) -> Result<Vec<UserInfo>> {
        let users: Vec<(String, String, Option<String>, String)> = sqlx::query_as(
            "SELECT id, username, name, password_hash FROM users ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        let blog_rows: Vec<(String, String, String, String, String)> = sqlx::query_as(
            "SELECT user_id, id, title, author, url FROM blogs WHERE user_id IS NOT NULL ORDER BY rowid",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut blogs_by_user: HashMap<String, Vec<BlogSummary>> = HashMap::new();
        for (user_id, id, title, author, url) in blog_rows {
            blogs_by_user
                .entry(user_id)
                .or_default()
                .push(summary_from_row((id, title, author, url)));
        }

        Ok(users
            .into_iter()
            .map(|row| {
                let user = user_from_row(row);
                let blogs = blogs_by_user.remove(&user.id).unwrap_or_default();
                user.into_info(blogs)
            })
            .collect())
    }

    /// Remove every user
    pub async fn delete_all(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM users").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}

fn user_from_row((id, username, name, password_hash): (String, String, Option<String>, String)) -> User {
    User {
        id,
        username,
        name,
        password_hash,
    }
}

fn summary_from_row((id, title, author, url): (String, String, String, String)) -> BlogSummary {
    BlogSummary {
        url,
        title,
        author,
        id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn manager(secret: &str, ttl_secs: i64) -> AuthManager {
        let pool = SqlitePoolOptions::new()
            .connect_lazy("sqlite::memory:")
            .unwrap();
        let mut config = ServerConfig::new(secret);
        config.token_ttl_secs = ttl_secs;
        config.bcrypt_cost = 4;
        AuthManager::new(pool, &config)
    }

    fn user() -> User {
        User {
            id: Uuid::new_v4().to_string(),
            username: "root".to_string(),
            name: Some("Superuser".to_string()),
            password_hash: String::new(),
        }
    }

    #[tokio::test]
    async fn issued_token_verifies() {
        let auth = manager("sekret", 3600).await;
        let user = user();

        let token = auth.issue_token(&user).unwrap();
        let claims = auth.verify_token(&token).unwrap();

        assert_eq!(claims.id, user.id);
        assert_eq!(claims.username, "root");
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_is_invalid() {
        let issuer = manager("one-secret", 3600).await;
        let verifier = manager("another-secret", 3600).await;

        let token = issuer.issue_token(&user()).unwrap();

        assert!(matches!(verifier.verify_token(&token), Err(Error::TokenInvalid)));
    }

    #[tokio::test]
    async fn garbage_token_is_invalid() {
        let auth = manager("sekret", 3600).await;
        assert!(matches!(auth.verify_token("not-a-jwt"), Err(Error::TokenInvalid)));
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        // Past the default 60s leeway
        let auth = manager("sekret", -3600).await;
        let token = auth.issue_token(&user()).unwrap();

        assert!(matches!(auth.verify_token(&token), Err(Error::TokenExpired)));
    }

    #[tokio::test]
    async fn token_without_user_id_is_rejected() {
        let auth = manager("sekret", 3600).await;
        let mut anonymous = user();
        anonymous.id = String::new();

        let token = auth.issue_token(&anonymous).unwrap();

        assert!(matches!(auth.verify_token(&token), Err(Error::TokenClaimsInvalid)));
    }
}

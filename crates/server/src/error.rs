use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // Request Errors
    #[error("malformatted id")]
    MalformattedId,
    #[error("{0}")]
    Validation(String),
    #[error("expected `username` to be unique")]
    DuplicateUsername,

    // Auth Errors
    #[error("Token missing")]
    TokenMissing,
    #[error("token invalid")]
    TokenInvalid,
    #[error("Token invalid")]
    TokenClaimsInvalid,
    #[error("token expired")]
    TokenExpired,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("only the creator can delete a blog")]
    NotBlogOwner,
    #[error("auth context missing")]
    CtxMissing,

    // Lookup Errors
    #[error("User not found")]
    UserNotFound,
    #[error("blog not found")]
    BlogNotFound,
    #[error("unknown endpoint")]
    UnknownEndpoint,

    // Generic
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("password hashing failed: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),
    #[error("token encoding failed: {0}")]
    Token(#[source] jsonwebtoken::errors::Error),
    #[error("{0}")]
    Internal(String),
}

pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::MalformattedId | Error::Validation(_) | Error::DuplicateUsername => {
                StatusCode::BAD_REQUEST
            }
            Error::TokenMissing
            | Error::TokenInvalid
            | Error::TokenClaimsInvalid
            | Error::TokenExpired
            | Error::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Error::NotBlogOwner => StatusCode::FORBIDDEN,
            Error::UserNotFound | Error::BlogNotFound | Error::UnknownEndpoint => {
                StatusCode::NOT_FOUND
            }
            Error::CtxMissing
            | Error::Database(_)
            | Error::PasswordHash(_)
            | Error::Token(_)
            | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();

        // Server-side failures keep their details in the log only
        let message = if status.is_server_error() {
            error!("{}", self);
            "internal error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::Validation(rejection.body_text())
    }
}

//! HTTP handlers for the bloglist API

pub mod auth;
pub mod blogs;
pub mod stats;
pub mod testing;

// Auth handlers
pub use auth::{create_user, get_user, list_users, login};

// Blog handlers
pub use blogs::{create_blog, delete_blog, get_blog, list_blogs, update_blog};

pub use stats::get_stats;
pub use testing::reset;

use crate::error::Error;

/// Fallback for routes nothing else matched
pub async fn unknown_endpoint() -> Error {
    Error::UnknownEndpoint
}

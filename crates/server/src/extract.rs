use axum::extract::FromRequest;

use crate::error::Error;

/// `axum::Json` whose rejections go through `Error`, so a bad body
/// still gets a JSON error response
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct ApiJson<T>(pub T);

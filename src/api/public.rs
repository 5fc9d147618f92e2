//! Public API types

use axum::response::{IntoResponse, Json, Response};
use http::StatusCode;
use serde_json::json;

// Errors

/// API-facing error: a client rejection with a detail message, or an
/// unexpected internal failure.
pub enum ApiError {
    BadRequest(String),
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::BadRequest(detail.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(detail) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "detail": detail }))).into_response()
            }
            Self::Internal(error) => {
                // Always log the error
                tracing::error!("{}", error);

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Something went wrong: {}", error),
                )
                    .into_response()
            }
        }
    }
}

/// Enables using `?` on functions that return `Result<_,
/// anyhow::Error>` to turn them into `Result<_, ApiError>`
impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Internal(err.into())
    }
}

// Re-export public types from each route

pub mod emails {
    pub use crate::api::routes::emails::public::*;
}

pub mod send {
    pub use crate::api::routes::send::public::*;
}

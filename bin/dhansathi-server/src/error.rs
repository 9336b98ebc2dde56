//! Unified server error type.
//!
//! Every handler returns `Result<T, ServerError>`, which implements
//! [`axum::response::IntoResponse`] so errors become a JSON `{"error": ...}`
//! body with the matching status code.
//!
//! Internal errors (database, completion service) are logged with full
//! detail; the caller only sees a generic message.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::completion::CompletionError;
use crate::services::ChatError;

/// Body returned for any failure the caller cannot act on.
pub const GENERIC_FAILURE: &str = "Something went wrong while processing your request";

#[derive(Debug, Error)]
pub enum ServerError {
    /// Propagated from the SQLite store.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The completion service failed or answered with garbage.
    #[error("upstream error: {0}")]
    Upstream(#[from] CompletionError),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    /// A required dependency is not configured. The message is shown to the
    /// caller as-is.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The request body exceeds the accepted size.
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, client_message) = match &self {
            ServerError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
            ServerError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
            ServerError::ServiceUnavailable(m) => (StatusCode::INTERNAL_SERVER_ERROR, m.clone()),
            ServerError::PayloadTooLarge(m) => (StatusCode::PAYLOAD_TOO_LARGE, m.clone()),

            ServerError::Database(e) => {
                error!(error = %e, "database error");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE.to_owned())
            }
            ServerError::Upstream(e) => {
                error!(error = %e, "completion service error");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE.to_owned())
            }
        };
        (status, Json(json!({ "error": client_message }))).into_response()
    }
}

impl From<ChatError> for ServerError {
    fn from(e: ChatError) -> Self {
        match e {
            ChatError::InvalidRequest(m) => ServerError::BadRequest(m),
            ChatError::ServiceUnavailable(m) => ServerError::ServiceUnavailable(m),
            ChatError::Upstream(e) => ServerError::Upstream(e),
            ChatError::Persistence(e) => ServerError::Database(e),
        }
    }
}

impl From<JsonRejection> for ServerError {
    fn from(e: JsonRejection) -> Self {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ServerError::PayloadTooLarge(e.body_text())
        } else {
            ServerError::BadRequest(e.body_text())
        }
    }
}

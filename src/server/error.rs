//! Request-level error responses
//!
//! Every failure inside a request handler, whether malformed input or a
//! prediction error, surfaces uniformly as a 400 with the
//! `{"error": ..., "status": "failed"}` body. Startup failures never reach
//! this type; they abort the process before the listener binds.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("{0}")]
    BadRequest(String),
}

impl From<crate::error::ProgressionError> for ServerError {
    fn from(err: crate::error::ProgressionError) -> Self {
        ServerError::BadRequest(err.to_string())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let ServerError::BadRequest(message) = self;
        tracing::debug!(error = %message, "request rejected");

        let body = Json(json!({
            "error": message,
            "status": "failed",
        }));
        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;

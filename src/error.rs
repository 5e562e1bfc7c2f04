//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;
use std::fmt;

pub type AppResult<T> = Result<T, AppError>;

/// Request-path errors. All three kinds are recovered locally and surfaced
/// to the caller as `{"error": <message>}` with status 400; the message
/// prefixes keep the kinds textually distinct.
#[derive(Debug)]
pub enum AppError {
    /// Body absent, unparseable, not a JSON object, or missing the
    /// top-level "data" array.
    Structural(String),

    /// Well-formed body with a record-level constraint violation.
    Validation(String),

    /// Model invocation failed.
    Processing(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Structural(msg) => write!(f, "Malformed request: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation error: {}", msg),
            AppError::Processing(msg) => write!(f, "Error processing request: {}", msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Processing(msg) = &self {
            tracing::error!("Error processing request: {}", msg);
        }

        let body = Json(json!({
            "error": self.to_string()
        }));

        (StatusCode::BAD_REQUEST, body).into_response()
    }
}

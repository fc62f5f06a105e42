//! Application-wide error types using thiserror.

use analyst_common::AnalystError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Startup and serving errors.
#[derive(thiserror::Error, Debug)]
pub enum ServerError {
    /// Configuration or service construction error.
    #[error("Configuration error: {0}")]
    Config(#[from] AnalystError),

    /// Listener I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the server application.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors returned to HTTP callers as `{"error": ...}`.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// The questions part is absent or the body is not multipart.
    #[error("{0}")]
    InputMissing(String),

    /// Failure before the questions part could be read.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InputMissing(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AnalystError> for ApiError {
    fn from(err: AnalystError) -> Self {
        match err {
            AnalystError::InputMissing { field } => Self::InputMissing(format!("{field} is required")),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

//! Error types for the relay service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Relay error types.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Malformed or missing caller input. Never reaches the network layer.
    #[error("{0}")]
    Validation(String),

    /// Caller is not allowed to perform the admin action.
    #[error("{0}")]
    Unauthorized(String),

    /// The delivery gateway rejected the notification or reported
    /// per-message errors.
    #[error("{0}")]
    Gateway(String),

    /// Storage or transport failure unrelated to caller input.
    #[error("{0}")]
    Internal(String),
}

/// Uniform failure body: `{success: false, message}`.
#[derive(Debug, Serialize)]
pub struct FailureBody {
    pub success: bool,
    pub message: String,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = match &self {
            RelayError::Validation(_) => StatusCode::BAD_REQUEST,
            RelayError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            RelayError::Gateway(_) => StatusCode::BAD_GATEWAY,
            RelayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = FailureBody {
            success: false,
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(e: reqwest::Error) -> Self {
        RelayError::Internal(format!("Gateway transport failure: {}", e))
    }
}

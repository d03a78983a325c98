//! Client errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The relay answered with `{success:false, message}`.
    #[error("{0}")]
    Api(String),

    #[error("{0}")]
    Validation(String),
}

/// Why the platform failed to produce a delivery token.
#[derive(Error, Debug)]
pub enum TokenError {
    /// The user declined push permission; terminal for this attempt.
    #[error("Push permissions are required to register this device")]
    PermissionDenied,

    #[error("No delivery token available: {0}")]
    Unavailable(String),
}

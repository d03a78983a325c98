//! HTTP request handlers.

use super::types::{
    AckResponse, DevicesResponse, HealthResponse, RegisterDeviceRequest, RequestPinRequest,
    SendPushRequest, SendPushResponse, VerifyPinRequest,
};
use super::AppState;
use crate::error::RelayError;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use tracing::{error, info, warn};

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        message: "API is running".to_string(),
    })
}

/// Bind a delivery token to a phone number.
///
/// Re-registering a known token is the normal rotation path and overwrites
/// the existing binding.
pub async fn register_device(
    State(state): State<AppState>,
    Json(request): Json<RegisterDeviceRequest>,
) -> Result<Json<AckResponse>, RelayError> {
    let phone = request.phone.trim();
    let token = request.token.trim();

    if phone.is_empty() || token.is_empty() {
        return Err(RelayError::Validation(
            "phone and token are required".into(),
        ));
    }

    state
        .store
        .upsert(phone.to_string(), token.to_string())
        .await
        .map_err(|e| {
            error!(phone = %phone, "Failed to register push token: {}", e);
            RelayError::Internal("Unable to register push token".into())
        })?;

    info!(phone = %phone, "Registered push token");
    Ok(Json(AckResponse::ok()))
}

/// List every registered device, newest first.
///
/// The failure shape differs from the other routes: callers always get a
/// `devices` array, with a message attached on error.
pub async fn list_devices(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.list_all().await {
        Ok(devices) => (
            StatusCode::OK,
            Json(DevicesResponse {
                devices,
                message: None,
            }),
        ),
        Err(e) => {
            error!("Failed to load devices: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DevicesResponse {
                    devices: Vec::new(),
                    message: Some("Unable to load devices".into()),
                }),
            )
        }
    }
}

/// Forward one test notification to the delivery gateway.
pub async fn send_push(
    State(state): State<AppState>,
    Json(request): Json<SendPushRequest>,
) -> Result<Json<SendPushResponse>, RelayError> {
    let token = request.token.trim();
    let title = request.title.trim();
    let message = request.message.trim();

    if token.is_empty() || title.is_empty() || message.is_empty() {
        return Err(RelayError::Validation(
            "token, title, and message are required".into(),
        ));
    }

    let ticket = state.gateway.send(token, title, message).await.map_err(|e| {
        match e {
            RelayError::Gateway(msg) => {
                warn!(message = %msg, "Gateway rejected notification");
                RelayError::Gateway(msg)
            }
            other => {
                error!("Failed to send push notification: {}", other);
                RelayError::Internal("Unable to send notification".into())
            }
        }
    })?;

    info!("Notification forwarded to gateway");
    Ok(Json(SendPushResponse {
        success: true,
        ticket,
    }))
}

/// Issue a one-time admin PIN to the given phone.
pub async fn request_pin(
    State(state): State<AppState>,
    Json(request): Json<RequestPinRequest>,
) -> Result<Json<AckResponse>, RelayError> {
    let phone = request.phone.trim();

    if phone.len() < 6 {
        return Err(RelayError::Validation(
            "A valid phone number is required".into(),
        ));
    }

    state.pin_service.request_pin(phone).await?;
    Ok(Json(AckResponse::ok()))
}

/// Verify a one-time admin PIN.
pub async fn verify_pin(
    State(state): State<AppState>,
    Json(request): Json<VerifyPinRequest>,
) -> Result<Json<AckResponse>, RelayError> {
    let phone = request.phone.trim();
    let pin = request.pin.trim();

    if phone.is_empty() || pin.len() < 4 {
        return Err(RelayError::Validation("A valid PIN is required".into()));
    }

    state.pin_service.verify_pin(phone, pin).await?;
    Ok(Json(AckResponse::ok()))
}

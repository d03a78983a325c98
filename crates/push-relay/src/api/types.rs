//! API request and response types.

use crate::registry::PushDevice;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request to bind a device token to a phone number.
///
/// Missing fields deserialize as empty strings and fail trim-validation in
/// the handler with 400, keeping the `{success:false, message}` shape.
#[derive(Debug, Deserialize)]
pub struct RegisterDeviceRequest {
    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub token: String,
}

/// Plain acknowledgment: `{success: true}`.
#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub success: bool,
}

impl AckResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Registered devices, most recently registered first.
#[derive(Debug, Serialize)]
pub struct DevicesResponse {
    pub devices: Vec<PushDevice>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Request to send one test notification.
#[derive(Debug, Deserialize)]
pub struct SendPushRequest {
    #[serde(default)]
    pub token: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub message: String,
}

/// Response after a successful dispatch; `ticket` is the gateway's delivery
/// receipt, passed through verbatim.
#[derive(Debug, Serialize)]
pub struct SendPushResponse {
    pub success: bool,
    pub ticket: Value,
}

/// Request to issue an admin PIN.
#[derive(Debug, Deserialize)]
pub struct RequestPinRequest {
    #[serde(default)]
    pub phone: String,
}

/// Request to verify an admin PIN.
#[derive(Debug, Deserialize)]
pub struct VerifyPinRequest {
    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub pin: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

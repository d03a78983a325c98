//! Wire types shared with the relay API.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// One registered device as listed by the relay.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub phone: String,
    pub token: String,
    pub registered_at: DateTime<Utc>,
}

/// Standard `{success, message}` acknowledgment body.
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DevicesResponse {
    #[serde(default)]
    pub devices: Vec<DeviceInfo>,

    #[serde(default)]
    pub message: Option<String>,
}

/// Response to a dispatch request; `ticket` is the gateway receipt verbatim.
#[derive(Debug, Deserialize)]
pub struct SendPushResponse {
    #[serde(default)]
    pub success: bool,

    #[serde(default)]
    pub ticket: Option<Value>,

    #[serde(default)]
    pub message: Option<String>,
}

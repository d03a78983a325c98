//! Typed HTTP client for the relay API.

use crate::error::ClientError;
use crate::types::{ApiResponse, DeviceInfo, DevicesResponse, SendPushResponse};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client for the relay API.
#[derive(Clone)]
pub struct RelayClient {
    client: Client,
    base_url: String,
}

impl RelayClient {
    /// Create a new relay client.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Bind a delivery token to a phone number.
    pub async fn register_device(&self, phone: &str, token: &str) -> Result<(), ClientError> {
        let url = format!("{}/push/register", self.base_url);
        debug!(url = %url, "Registering device");

        let response = self
            .client
            .post(&url)
            .json(&json!({"phone": phone, "token": token}))
            .send()
            .await?;

        let ok = response.status().is_success();
        let body: ApiResponse = response.json().await?;

        if !ok || !body.success {
            let message = body
                .message
                .unwrap_or_else(|| "Unable to register device right now".into());
            warn!(message = %message, "Device registration failed");
            return Err(ClientError::Api(message));
        }

        Ok(())
    }

    /// List every registered device, newest first.
    pub async fn list_devices(&self) -> Result<Vec<DeviceInfo>, ClientError> {
        let url = format!("{}/admin/devices", self.base_url);

        let response = self.client.get(&url).send().await?;
        let ok = response.status().is_success();
        let body: DevicesResponse = response.json().await?;

        if !ok {
            let message = body.message.unwrap_or_else(|| "Unable to load devices".into());
            return Err(ClientError::Api(message));
        }

        Ok(body.devices)
    }

    /// Send one test notification, returning the gateway ticket.
    pub async fn send_push(
        &self,
        token: &str,
        title: &str,
        message: &str,
    ) -> Result<Value, ClientError> {
        let url = format!("{}/admin/send-push", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(&json!({"token": token, "title": title, "message": message}))
            .send()
            .await?;

        let ok = response.status().is_success();
        let body: SendPushResponse = response.json().await?;

        if !ok || !body.success {
            let message = body
                .message
                .unwrap_or_else(|| "Failed to send notification".into());
            return Err(ClientError::Api(message));
        }

        Ok(body.ticket.unwrap_or(Value::Null))
    }

    /// Ask the relay to issue a one-time admin PIN for `phone`.
    pub async fn request_pin(&self, phone: &str) -> Result<(), ClientError> {
        self.ack_post("/admin/request-pin", json!({"phone": phone}), "Unable to send PIN")
            .await
    }

    /// Submit a one-time admin PIN for verification.
    pub async fn verify_pin(&self, phone: &str, pin: &str) -> Result<(), ClientError> {
        self.ack_post(
            "/admin/verify-pin",
            json!({"phone": phone, "pin": pin}),
            "PIN verification failed",
        )
        .await
    }

    async fn ack_post(
        &self,
        route: &str,
        body: Value,
        fallback: &str,
    ) -> Result<(), ClientError> {
        let url = format!("{}{}", self.base_url, route);

        let response = self.client.post(&url).json(&body).send().await?;
        let ok = response.status().is_success();
        let body: ApiResponse = response.json().await?;

        if !ok || !body.success {
            let message = body.message.unwrap_or_else(|| fallback.into());
            warn!(route = %route, message = %message, "Request rejected by relay");
            return Err(ClientError::Api(message));
        }

        Ok(())
    }
}

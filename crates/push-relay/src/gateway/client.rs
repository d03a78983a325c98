//! Expo-compatible push gateway client.

use super::PushGateway;
use crate::error::RelayError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Outbound notification payload understood by the gateway.
#[derive(Debug, Serialize)]
struct PushPayload<'a> {
    to: &'a str,
    title: &'a str,
    body: &'a str,
    sound: &'static str,
    priority: &'static str,
}

/// HTTP client for an Expo-compatible push delivery endpoint.
#[derive(Clone)]
pub struct ExpoPushClient {
    client: Client,
    url: String,
}

impl ExpoPushClient {
    /// Create a new gateway client.
    pub fn new(url: impl Into<String>) -> Result<Self, RelayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| RelayError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl PushGateway for ExpoPushClient {
    #[instrument(skip(self, message))]
    async fn send(&self, token: &str, title: &str, message: &str) -> Result<Value, RelayError> {
        let token = token.trim();
        let title = title.trim();
        let message = message.trim();

        // Fail fast before any network call.
        if token.is_empty() || title.is_empty() || message.is_empty() {
            return Err(RelayError::Validation(
                "token, title, and message are required".into(),
            ));
        }

        let payload = PushPayload {
            to: token,
            title,
            body: message,
            sound: "default",
            priority: "high",
        };

        debug!(url = %self.url, "Forwarding notification to gateway");

        let response = self.client.post(&self.url).json(&payload).send().await?;
        let status = response.status();

        let body: Value = response.json().await.map_err(|e| {
            RelayError::Internal(format!("Malformed gateway response: {}", e))
        })?;

        let errors = body.get("errors").and_then(Value::as_array);
        if !status.is_success() || errors.map(|e| !e.is_empty()).unwrap_or(false) {
            error!(status = %status, body = %body, "Gateway rejected notification");
            let message = errors
                .and_then(|e| e.first())
                .and_then(|e| e.get("message"))
                .and_then(Value::as_str)
                .unwrap_or("Failed to send notification")
                .to_string();
            return Err(RelayError::Gateway(message));
        }

        // The ticket is opaque to this layer; pass the gateway's `data`
        // through verbatim, or the whole body when it has none.
        let ticket = body.get("data").cloned().unwrap_or(body);

        debug!("Notification accepted by gateway");
        Ok(ticket)
    }
}

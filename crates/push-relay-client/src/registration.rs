//! Device registration flow.
//!
//! Orchestrates acquiring a platform delivery token and submitting it to
//! the relay. One submission at a time per flow instance; re-submitting
//! after success is ordinary token rotation.

use crate::client::RelayClient;
use crate::error::{ClientError, TokenError};
use async_trait::async_trait;
use tracing::{debug, warn};

/// Platform capability that asks for push permission and returns an opaque
/// delivery token.
#[async_trait]
pub trait PushTokenProvider: Send + Sync {
    async fn acquire(&self) -> Result<String, TokenError>;
}

/// Outcome of the most recent submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationStatus {
    Idle,
    Success,
    Error,
}

/// Client-side registration flow.
pub struct RegistrationFlow<P> {
    client: RelayClient,
    provider: P,
    status: RegistrationStatus,
    status_message: String,
    token: Option<String>,
    in_flight: bool,
}

impl<P: PushTokenProvider> RegistrationFlow<P> {
    pub fn new(client: RelayClient, provider: P) -> Self {
        Self {
            client,
            provider,
            status: RegistrationStatus::Idle,
            status_message: "Ready to register your device".into(),
            token: None,
            in_flight: false,
        }
    }

    pub fn status(&self) -> RegistrationStatus {
        self.status
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// The last acquired delivery token, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Truncated token for display: first 9 characters, ellipsis, last 6.
    pub fn short_token(&self) -> Option<String> {
        self.token.as_deref().map(|t| {
            let count = t.chars().count();
            if count <= 16 {
                t.to_string()
            } else {
                let head: String = t.chars().take(9).collect();
                let tail: String = t.chars().skip(count - 6).collect();
                format!("{}…{}", head, tail)
            }
        })
    }

    /// Acquire a delivery token and register it for `phone_input`.
    pub async fn submit(&mut self, phone_input: &str) {
        if self.in_flight {
            debug!("Ignoring submit while a registration is in flight");
            return;
        }

        let phone = phone_input.trim();
        if phone.len() < 6 {
            self.status = RegistrationStatus::Error;
            self.status_message = "Please enter a valid phone number".into();
            return;
        }

        self.in_flight = true;
        self.status = RegistrationStatus::Idle;
        self.status_message = "Requesting push notification permission…".into();

        let token = match self.provider.acquire().await {
            Ok(token) => token,
            Err(e) => {
                warn!("Token acquisition failed: {}", e);
                self.status = RegistrationStatus::Error;
                self.status_message = e.to_string();
                self.in_flight = false;
                return;
            }
        };

        self.token = Some(token.clone());
        self.status_message = "Registering device with the relay…".into();

        match self.client.register_device(phone, &token).await {
            Ok(()) => {
                self.status = RegistrationStatus::Success;
                self.status_message = "Device registered for alerts.".into();
            }
            Err(ClientError::Api(message)) => {
                warn!(message = %message, "Registration rejected");
                self.status = RegistrationStatus::Error;
                self.status_message = message;
            }
            Err(e) => {
                warn!("Registration network error: {}", e);
                self.status = RegistrationStatus::Error;
                self.status_message = "Registration failed. Please try again.".into();
            }
        }
        self.in_flight = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Provider with a fixed outcome, counting how often it is asked.
    struct FakeProvider {
        outcome: Result<String, TokenError>,
        calls: Arc<AtomicUsize>,
    }

    impl FakeProvider {
        fn granting(token: &str) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    outcome: Ok(token.to_string()),
                    calls: calls.clone(),
                },
                calls,
            )
        }

        fn denying() -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    outcome: Err(TokenError::PermissionDenied),
                    calls: calls.clone(),
                },
                calls,
            )
        }
    }

    #[async_trait]
    impl PushTokenProvider for FakeProvider {
        async fn acquire(&self) -> Result<String, TokenError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.outcome {
                Ok(t) => Ok(t.clone()),
                Err(TokenError::PermissionDenied) => Err(TokenError::PermissionDenied),
                Err(TokenError::Unavailable(m)) => Err(TokenError::Unavailable(m.clone())),
            }
        }
    }

    #[tokio::test]
    async fn test_short_phone_rejected_without_side_effects() {
        let server = MockServer::start().await;
        let (provider, calls) = FakeProvider::granting("tok");
        let mut flow = RegistrationFlow::new(RelayClient::new(server.uri()).unwrap(), provider);

        flow.submit("12345").await;

        assert_eq!(flow.status(), RegistrationStatus::Error);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_permission_denied_never_contacts_registry() {
        let server = MockServer::start().await;
        let (provider, calls) = FakeProvider::denying();
        let mut flow = RegistrationFlow::new(RelayClient::new(server.uri()).unwrap(), provider);

        flow.submit("+15550102233").await;

        assert_eq!(flow.status(), RegistrationStatus::Error);
        assert_eq!(
            flow.status_message(),
            "Push permissions are required to register this device"
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_successful_registration() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/push/register"))
            .and(body_partial_json(serde_json::json!({
                "phone": "+15550102233",
                "token": "ExponentPushToken[abcdefgh]",
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": true})),
            )
            .mount(&server)
            .await;

        let (provider, _) = FakeProvider::granting("ExponentPushToken[abcdefgh]");
        let mut flow = RegistrationFlow::new(RelayClient::new(server.uri()).unwrap(), provider);

        flow.submit("+15550102233").await;

        assert_eq!(flow.status(), RegistrationStatus::Success);
        assert_eq!(flow.token(), Some("ExponentPushToken[abcdefgh]"));
    }

    #[tokio::test]
    async fn test_server_failure_surfaces_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/push/register"))
            .respond_with(ResponseTemplate::new(500).set_body_json(
                serde_json::json!({"success": false, "message": "Unable to register push token"}),
            ))
            .mount(&server)
            .await;

        let (provider, _) = FakeProvider::granting("tok");
        let mut flow = RegistrationFlow::new(RelayClient::new(server.uri()).unwrap(), provider);

        flow.submit("+15550102233").await;

        assert_eq!(flow.status(), RegistrationStatus::Error);
        assert_eq!(flow.status_message(), "Unable to register push token");
    }

    #[tokio::test]
    async fn test_resubmission_after_success_is_allowed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/push/register"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": true})),
            )
            .expect(2)
            .mount(&server)
            .await;

        let (provider, calls) = FakeProvider::granting("tok");
        let mut flow = RegistrationFlow::new(RelayClient::new(server.uri()).unwrap(), provider);

        flow.submit("+15550102233").await;
        flow.submit("+15550102233").await;

        assert_eq!(flow.status(), RegistrationStatus::Success);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_short_token_truncation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/push/register"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": true})),
            )
            .mount(&server)
            .await;

        let (provider, _) = FakeProvider::granting("ExponentPushToken[abcdefghij]");
        let mut flow = RegistrationFlow::new(RelayClient::new(server.uri()).unwrap(), provider);
        assert!(flow.short_token().is_none());

        flow.submit("+15550102233").await;

        assert_eq!(flow.short_token().unwrap(), "ExponentP…fghij]");
    }
}

//! Admin authentication flow.
//!
//! A forward-only state machine gating the admin surface: the admin enters
//! a phone number, receives a one-time PIN out-of-band, and submits it.
//! Failures never move the stage backwards; they surface a status message
//! and leave the flow where it was, so every step is retry-safe.

use crate::client::RelayClient;
use crate::error::ClientError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Authentication progress. Advances only on a server acknowledgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStage {
    /// Waiting for the admin's phone number.
    Enter,
    /// PIN issued, waiting for the admin to type it in.
    Verify,
    /// Terminal: the admin surface may be shown.
    Authenticated,
}

/// Handle for tearing the flow down from the hosting UI.
///
/// Once closed, any request result that is still in flight is dropped
/// without touching the flow's state.
#[derive(Clone)]
pub struct FlowHandle(Arc<AtomicBool>);

impl FlowHandle {
    pub fn close(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// Two-stage admin authentication flow.
pub struct AdminAuthFlow {
    client: RelayClient,
    phone: String,
    stage: AuthStage,
    loading: bool,
    status_message: String,
    closed: Arc<AtomicBool>,
    on_authenticated: Option<Box<dyn FnOnce() + Send>>,
}

impl AdminAuthFlow {
    /// Create a new flow in the `Enter` stage. `on_authenticated` fires
    /// exactly once, when verification succeeds.
    pub fn new(client: RelayClient, on_authenticated: impl FnOnce() + Send + 'static) -> Self {
        Self {
            client,
            phone: String::new(),
            stage: AuthStage::Enter,
            loading: false,
            status_message: "Enter your admin phone number to receive a secure PIN".into(),
            closed: Arc::new(AtomicBool::new(false)),
            on_authenticated: Some(Box::new(on_authenticated)),
        }
    }

    pub fn stage(&self) -> AuthStage {
        self.stage
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Teardown handle for the hosting UI.
    pub fn handle(&self) -> FlowHandle {
        FlowHandle(self.closed.clone())
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Ask the relay to send a PIN to `phone`. Valid only from `Enter`.
    pub async fn request_pin(&mut self, phone: &str) {
        if self.is_closed() || self.loading {
            debug!("Ignoring request_pin while busy or closed");
            return;
        }
        if self.stage != AuthStage::Enter {
            warn!(stage = ?self.stage, "request_pin is only valid from the Enter stage");
            return;
        }

        let trimmed = phone.trim();
        if trimmed.len() < 6 {
            self.status_message = "Please enter a valid phone number.".into();
            return;
        }

        self.loading = true;
        self.status_message = "Sending secure PIN to your device…".into();
        let result = self.client.request_pin(trimmed).await;

        // The hosting UI may have been torn down while we were waiting.
        if self.is_closed() {
            debug!("Dropping request_pin result, flow closed");
            return;
        }
        self.loading = false;

        match result {
            Ok(()) => {
                self.phone = trimmed.to_string();
                self.stage = AuthStage::Verify;
                self.status_message =
                    "PIN sent. Please check your messages and enter the code below.".into();
            }
            Err(ClientError::Api(message)) => {
                warn!(message = %message, "request_pin rejected");
                self.status_message = message;
            }
            Err(e) => {
                warn!("request_pin network error: {}", e);
                self.status_message = "Network error. Please try again in a moment.".into();
            }
        }
    }

    /// Submit the PIN for verification. Valid only from `Verify`.
    pub async fn verify_pin(&mut self, pin: &str) {
        if self.is_closed() || self.loading {
            debug!("Ignoring verify_pin while busy or closed");
            return;
        }
        if self.stage != AuthStage::Verify {
            warn!(stage = ?self.stage, "verify_pin is only valid from the Verify stage");
            return;
        }

        let trimmed = pin.trim();
        if trimmed.len() < 4 {
            self.status_message = "Please enter the 4-digit PIN sent to you.".into();
            return;
        }

        self.loading = true;
        self.status_message = "Verifying credentials…".into();
        let result = self.client.verify_pin(&self.phone, trimmed).await;

        if self.is_closed() {
            debug!("Dropping verify_pin result, flow closed");
            return;
        }
        self.loading = false;

        match result {
            Ok(()) => {
                self.stage = AuthStage::Authenticated;
                self.status_message = "Authenticated! Loading admin tools…".into();
                if let Some(callback) = self.on_authenticated.take() {
                    callback();
                }
            }
            Err(ClientError::Api(message)) => {
                warn!(message = %message, "verify_pin rejected");
                self.status_message = message;
            }
            Err(e) => {
                warn!("verify_pin network error: {}", e);
                self.status_message = "Network error. Please try again in a moment.".into();
            }
        }
    }
}

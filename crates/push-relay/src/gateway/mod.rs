//! Push delivery gateway.

mod client;

pub use client::ExpoPushClient;

use crate::error::RelayError;
use async_trait::async_trait;
use serde_json::Value;

/// Dispatch boundary to the external delivery gateway.
///
/// The contract is a single best-effort attempt per call; a retry or
/// backoff decorator can wrap an implementation without changing it.
#[async_trait]
pub trait PushGateway: Send + Sync {
    /// Validate and forward one notification, returning the gateway's
    /// delivery ticket verbatim.
    async fn send(&self, token: &str, title: &str, message: &str) -> Result<Value, RelayError>;
}

//! Admin PIN issuance and verification.
//!
//! A PIN is four random decimal digits, delivered out-of-band through a
//! [`PinSender`] and held in memory as a SHA-256 hash. Each PIN is single
//! use, expires after a configurable TTL, and is discarded after too many
//! wrong attempts. Re-requesting a PIN replaces any outstanding one for
//! that phone.

use crate::error::RelayError;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Out-of-band PIN delivery channel (SMS or equivalent).
#[async_trait]
pub trait PinSender: Send + Sync {
    async fn deliver(&self, phone: &str, pin: &str) -> Result<(), RelayError>;
}

/// Development sender that writes the PIN to the log instead of sending it.
#[derive(Debug, Default)]
pub struct LogPinSender;

#[async_trait]
impl PinSender for LogPinSender {
    async fn deliver(&self, phone: &str, pin: &str) -> Result<(), RelayError> {
        info!(phone = %phone, pin = %pin, "Admin PIN issued (log delivery)");
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct IssuedPin {
    pin_hash: String,
    issued_at: DateTime<Utc>,
    attempts: u32,
}

/// In-memory PIN service keyed by trimmed phone number.
pub struct PinService {
    pins: RwLock<HashMap<String, IssuedPin>>,
    sender: Box<dyn PinSender>,
    ttl: Duration,
    max_attempts: u32,
    /// When non-empty, only these phones may request a PIN.
    admin_phones: Vec<String>,
}

impl PinService {
    pub fn new(
        sender: Box<dyn PinSender>,
        ttl_secs: i64,
        max_attempts: u32,
        admin_phones: Vec<String>,
    ) -> Self {
        Self {
            pins: RwLock::new(HashMap::new()),
            sender,
            ttl: Duration::seconds(ttl_secs),
            max_attempts,
            admin_phones,
        }
    }

    /// Issue a fresh PIN for `phone` and hand it to the delivery channel.
    pub async fn request_pin(&self, phone: &str) -> Result<(), RelayError> {
        if !self.admin_phones.is_empty() && !self.admin_phones.iter().any(|p| p == phone) {
            warn!(phone = %phone, "PIN requested for non-admin phone");
            return Err(RelayError::Unauthorized(
                "This phone number is not authorized for admin access".into(),
            ));
        }

        let pin = generate_pin();
        self.sender.deliver(phone, &pin).await?;

        let issued = IssuedPin {
            pin_hash: hash_pin(&pin),
            issued_at: Utc::now(),
            attempts: 0,
        };
        self.pins.write().await.insert(phone.to_string(), issued);

        info!(phone = %phone, "Admin PIN issued");
        Ok(())
    }

    /// Check `pin` against the outstanding PIN for `phone`.
    ///
    /// A correct PIN is consumed; an expired PIN or one that has exhausted
    /// its attempts is discarded, forcing a fresh request.
    pub async fn verify_pin(&self, phone: &str, pin: &str) -> Result<(), RelayError> {
        let mut pins = self.pins.write().await;

        let issued = pins.get_mut(phone).ok_or_else(|| {
            RelayError::Unauthorized("No PIN outstanding for this phone number".into())
        })?;

        if Utc::now() - issued.issued_at > self.ttl {
            pins.remove(phone);
            return Err(RelayError::Unauthorized(
                "PIN expired, request a new one".into(),
            ));
        }

        if issued.pin_hash != hash_pin(pin) {
            issued.attempts += 1;
            if issued.attempts >= self.max_attempts {
                pins.remove(phone);
                warn!(phone = %phone, "Admin PIN invalidated after too many attempts");
                return Err(RelayError::Unauthorized(
                    "Too many attempts, request a new PIN".into(),
                ));
            }
            return Err(RelayError::Unauthorized("Invalid PIN".into()));
        }

        // Single use.
        pins.remove(phone);
        info!(phone = %phone, "Admin PIN verified");
        Ok(())
    }
}

/// Four random decimal digits, zero-padded.
fn generate_pin() -> String {
    format!("{:04}", rand::thread_rng().gen_range(0..10_000u32))
}

/// SHA-256 hex hash of a PIN.
fn hash_pin(pin: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(pin.as_bytes());
    hex::encode(hasher.finalize())
}

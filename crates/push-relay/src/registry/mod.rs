//! Device-token registry.
//!
//! Each record binds a phone number to an opaque delivery token. The token
//! is the record's identity: re-registering the same token overwrites the
//! phone and timestamp (last-write-wins, normal token rotation). A phone
//! may own several devices, so phones are never deduplicated.

mod memory;

pub use memory::MemoryStore;

use crate::error::RelayError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One delivery-token binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushDevice {
    /// Owning user's phone number. Not unique across devices.
    pub phone: String,

    /// Opaque delivery token issued by the platform notification service.
    pub token: String,

    /// When this binding was inserted or last overwritten.
    pub registered_at: DateTime<Utc>,
}

impl PushDevice {
    pub fn new(phone: String, token: String) -> Self {
        Self {
            phone,
            token,
            registered_at: Utc::now(),
        }
    }
}

/// Storage abstraction for the registry.
///
/// Backed by [`MemoryStore`] in this deployment; a multi-instance
/// deployment must swap in a store with transactional upsert semantics to
/// keep last-write-wins per token.
#[async_trait]
pub trait DeviceStore: Send + Sync {
    /// Insert or replace the record keyed by `token`, stamping
    /// `registered_at` with the current time.
    async fn upsert(&self, phone: String, token: String) -> Result<(), RelayError>;

    /// Return some record whose phone matches, in current iteration order.
    ///
    /// When a phone owns several tokens this is not necessarily the most
    /// recent one. Callers needing the latest token must use [`list_all`]
    /// and filter; this contract is preserved deliberately.
    ///
    /// [`list_all`]: DeviceStore::list_all
    async fn find_by_phone(&self, phone: &str) -> Result<Option<PushDevice>, RelayError>;

    /// Snapshot of every record, most recently registered first.
    async fn list_all(&self) -> Result<Vec<PushDevice>, RelayError>;
}

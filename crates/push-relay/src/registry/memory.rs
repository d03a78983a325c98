//! In-memory device store.

use super::{DeviceStore, PushDevice};
use crate::error::RelayError;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory device store, records indexed by delivery token.
///
/// Records never expire; the process lifetime bounds the registry.
#[derive(Debug, Default)]
pub struct MemoryStore {
    devices: RwLock<HashMap<String, PushDevice>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct tokens currently registered.
    pub async fn count(&self) -> usize {
        self.devices.read().await.len()
    }
}

#[async_trait]
impl DeviceStore for MemoryStore {
    async fn upsert(&self, phone: String, token: String) -> Result<(), RelayError> {
        let record = PushDevice::new(phone, token.clone());
        self.devices.write().await.insert(token, record);
        Ok(())
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<PushDevice>, RelayError> {
        let devices = self.devices.read().await;
        Ok(devices.values().find(|d| d.phone == phone).cloned())
    }

    async fn list_all(&self) -> Result<Vec<PushDevice>, RelayError> {
        let devices = self.devices.read().await;
        let mut all: Vec<PushDevice> = devices.values().cloned().collect();
        // Newest first; token as tie-breaker for a deterministic order.
        all.sort_by(|a, b| {
            b.registered_at
                .cmp(&a.registered_at)
                .then_with(|| a.token.cmp(&b.token))
        });
        Ok(all)
    }
}

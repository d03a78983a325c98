//! Push Relay - device-token registry and notification dispatch service.
//!
//! The relay binds phone numbers to opaque delivery tokens, lets an
//! administrator authenticate with a one-time PIN, and forwards test
//! notifications to the external push gateway.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod gateway;
pub mod registry;

pub use config::Config;
pub use error::RelayError;
pub use gateway::{ExpoPushClient, PushGateway};
pub use registry::{DeviceStore, MemoryStore, PushDevice};

//! Client library for the push relay API.

mod auth;
mod client;
mod error;
mod registration;
mod types;

pub use auth::{AdminAuthFlow, AuthStage, FlowHandle};
pub use client::RelayClient;
pub use error::{ClientError, TokenError};
pub use registration::{PushTokenProvider, RegistrationFlow, RegistrationStatus};
pub use types::*;

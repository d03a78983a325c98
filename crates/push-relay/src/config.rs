//! Configuration for the relay service.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Relay configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Delivery gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Admin PIN configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Push delivery endpoint URL
    #[serde(default = "default_gateway_url")]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Seconds before an issued PIN expires
    #[serde(default = "default_pin_ttl_secs")]
    pub pin_ttl_secs: i64,

    /// Wrong attempts before an issued PIN is invalidated
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Phones allowed to request a PIN; empty allows any (development)
    #[serde(default)]
    pub admin_phones: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            port: default_port(),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            url: default_gateway_url(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            pin_ttl_secs: default_pin_ttl_secs(),
            max_attempts: default_max_attempts(),
            admin_phones: Vec::new(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_listen_addr() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    8080
}

fn default_gateway_url() -> String {
    "https://exp.host/--/api/v2/push/send".into()
}

fn default_pin_ttl_secs() -> i64 {
    300
}

fn default_max_attempts() -> u32 {
    5
}

fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

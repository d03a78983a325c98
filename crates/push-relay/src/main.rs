//! Push Relay - entry point.

use push_relay::api::{create_router, AppState};
use push_relay::auth::{LogPinSender, PinService};
use push_relay::config::Config;
use push_relay::gateway::ExpoPushClient;
use push_relay::registry::MemoryStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Push Relay");

    // Non-durable in-memory registry; records live for the process lifetime.
    let store = Arc::new(MemoryStore::new());

    // Delivery gateway client
    let gateway = match ExpoPushClient::new(config.gateway.url.clone()) {
        Ok(c) => Arc::new(c),
        Err(e) => {
            error!("Failed to create gateway client: {}", e);
            std::process::exit(1);
        }
    };

    if config.auth.admin_phones.is_empty() {
        info!("No admin allowlist configured, any phone may request a PIN");
    }

    // Admin PIN service with log delivery; a production deployment plugs in
    // an SMS sender here.
    let pin_service = PinService::new(
        Box::new(LogPinSender),
        config.auth.pin_ttl_secs,
        config.auth.max_attempts,
        config.auth.admin_phones.clone(),
    );

    let state = AppState::new(store, gateway, pin_service);
    let app = create_router(state);

    // Bind to address
    let addr = SocketAddr::new(
        config
            .server
            .listen_addr
            .parse()
            .unwrap_or([0, 0, 0, 0].into()),
        config.server.port,
    );

    info!("Listening on {}", addr);

    let listener = match TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    // Run server
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}

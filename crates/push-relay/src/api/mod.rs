//! HTTP API for the relay service.

mod handlers;
mod types;

pub use handlers::*;
pub use types::*;

use crate::auth::PinService;
use crate::gateway::PushGateway;
use crate::registry::DeviceStore;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Device-token registry
    pub store: Arc<dyn DeviceStore>,
    /// Delivery gateway client
    pub gateway: Arc<dyn PushGateway>,
    /// Admin PIN service
    pub pin_service: Arc<PinService>,
}

impl AppState {
    /// Create new application state.
    pub fn new(
        store: Arc<dyn DeviceStore>,
        gateway: Arc<dyn PushGateway>,
        pin_service: PinService,
    ) -> Self {
        Self {
            store,
            gateway,
            pin_service: Arc::new(pin_service),
        }
    }
}

/// Create the API router. All routes are CORS-open.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health))
        .route("/push/register", post(handlers::register_device))
        .route("/admin/devices", get(handlers::list_devices))
        .route("/admin/send-push", post(handlers::send_push))
        .route("/admin/request-pin", post(handlers::request_pin))
        .route("/admin/verify-pin", post(handlers::verify_pin))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Logging middleware for requests.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = std::time::Instant::now();

    let response = next.run(request).await;

    let duration = start.elapsed();
    let status = response.status();

    if status.is_success() {
        debug!(%method, %uri, %status, ?duration, "Request completed");
    } else {
        warn!(%method, %uri, %status, ?duration, "Request failed");
    }

    response
}

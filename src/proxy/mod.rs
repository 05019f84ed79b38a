//! Same-origin HTTP proxy over the upstream list and the poller's snapshot

use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::error::{Result, ScreenerError};

pub mod routes;

pub use routes::{create_router, AppState, FETCH_FAILED_MESSAGE, TOKEN_NOT_FOUND_MESSAGE};

/// Router with every route plus a permissive CORS layer
pub fn build_app(state: Arc<AppState>) -> Router {
    create_router(state).layer(CorsLayer::new().allow_origin(Any))
}

/// Serves until `shutdown` is notified
pub async fn start_server(
    addr: SocketAddr,
    state: Arc<AppState>,
    shutdown: Arc<Notify>,
) -> Result<()> {
    let app = build_app(state);

    let listener = TcpListener::bind(addr).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::AddrInUse => {
            ScreenerError::Server(format!("Failed to bind to {}: address already in use", addr))
        }
        _ => ScreenerError::Server(format!("Failed to bind to {}: {}", addr, e)),
    })?;
    info!("Proxy listening on http://{}", addr);

    let shutdown_signal = async move {
        shutdown.notified().await;
        info!("Received shutdown signal, stopping proxy");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| ScreenerError::Server(format!("Server error: {}", e)))?;

    info!("Proxy stopped");
    Ok(())
}

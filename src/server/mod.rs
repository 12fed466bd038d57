//! HTTP server for the marker API
//!
//! Thin axum surface over [`MarkerService`]: routing, shared state, and
//! graceful shutdown. All operation semantics live in the service layer.

pub mod handlers;

use crate::app::services::record_update::MarkerService;
use crate::{Error, Result};
use axum::Router;
use axum::routing::{get, post};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Shared application state for HTTP handlers
pub struct AppState {
    /// The collection operation dispatcher
    pub service: MarkerService,
}

/// Build the API router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/markers/:key",
            get(handlers::list_markers)
                .post(handlers::create_marker)
                .patch(handlers::patch_markers),
        )
        .route(
            "/api/markers/:key/bulk_array_update",
            post(handlers::bulk_array_update),
        )
        .route(
            "/api/markers/:key/:id",
            axum::routing::put(handlers::replace_marker).delete(handlers::delete_marker),
        )
        .route("/api/export/:key", get(handlers::export_markers))
        .with_state(state)
}

/// Bind and serve the API until ctrl-c
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| Error::io(format!("Failed to bind {}", addr), e))?;

    info!("Marker server listening on {}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::io("Server error".to_string(), e))
}

/// Resolves when the process receives ctrl-c
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install ctrl-c handler: {}", e);
        return;
    }
    info!("Received ctrl-c, shutting down");
}

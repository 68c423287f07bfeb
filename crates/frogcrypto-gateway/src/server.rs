// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use frogcrypto_config::model::ServerConfig;
use frogcrypto_core::FrogError;
use frogcrypto_engine::FrogCryptoService;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub service: Arc<FrogCryptoService>,
    /// Process start time for uptime calculation.
    pub start_time: Instant,
}

impl GatewayState {
    pub fn new(service: Arc<FrogCryptoService>) -> Self {
        Self {
            service,
            start_time: Instant::now(),
        }
    }
}

/// All routes of the FrogCrypto API.
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/frogcrypto/feeds", get(handlers::list_feeds))
        .route("/frogcrypto/feeds/{feed_id}", get(handlers::get_feed))
        .route("/frogcrypto/feeds/{feed_id}/poll", post(handlers::poll_feed))
        .route("/frogcrypto/user-state", post(handlers::user_state))
        .route("/frogcrypto/scoreboard", get(handlers::scoreboard))
        .route("/frogcrypto/admin/items", post(handlers::upsert_items))
        .route("/frogcrypto/admin/items/delete", post(handlers::delete_items))
        .route("/frogcrypto/admin/feeds", post(handlers::upsert_feeds))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `host:port` from config.
pub async fn bind(config: &ServerConfig) -> Result<TcpListener, FrogError> {
    let addr = format!("{}:{}", config.host, config.port);
    TcpListener::bind(&addr)
        .await
        .map_err(|e| FrogError::Internal(format!("failed to bind gateway to {addr}: {e}")))
}

/// Serve the API on `listener` until `cancel` fires, then drain in-flight
/// requests.
pub async fn start_server(
    listener: TcpListener,
    state: GatewayState,
    cancel: CancellationToken,
) -> Result<(), FrogError> {
    let app = build_router(state);
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Gateway server listening on {addr}");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
        .map_err(|e| FrogError::Internal(format!("gateway server error: {e}")))?;

    tracing::info!("Gateway server stopped");
    Ok(())
}

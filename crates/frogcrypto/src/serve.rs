// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `frogcrypto serve` command implementation.
//!
//! Opens the SQLite store, wires the credential verifier and reward issuer
//! into the service, loads the feed cache, and serves the HTTP API until a
//! shutdown signal arrives.

use std::sync::Arc;
use std::time::Duration;

use frogcrypto_auth::{Ed25519CredentialVerifier, Keypair, SignedRewardIssuer};
use frogcrypto_config::model::{FeedServiceConfig, FrogCryptoConfig};
use frogcrypto_core::{Clock, FrogError, PluginAdapter, StorageAdapter, SystemClock};
use frogcrypto_engine::{FrogCryptoService, ServiceSettings};
use frogcrypto_gateway::GatewayState;
use frogcrypto_storage::SqliteStorage;
use tracing::{info, warn};

use crate::shutdown;

/// Runs the `frogcrypto serve` command.
pub async fn run_serve(config: FrogCryptoConfig) -> Result<(), FrogError> {
    init_tracing(&config.logging.level);
    info!(version = env!("CARGO_PKG_VERSION"), "starting frogcrypto");

    let cancel = shutdown::install_signal_handler();

    let storage = Arc::new(SqliteStorage::new(config.storage.clone()));
    storage.initialize().await?;
    info!(path = %config.storage.database_path, "storage initialized");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let verifier = Ed25519CredentialVerifier::new(
        Arc::clone(&clock),
        Duration::from_secs(config.frogcrypto.credential_max_age_secs),
    );
    let issuer = build_issuer(&config.frogcrypto)?;
    info!(issuer = %issuer.issuer_hex(), "reward issuer ready");

    let service = Arc::new(FrogCryptoService::new(
        Arc::clone(&storage) as Arc<dyn StorageAdapter>,
        Arc::new(verifier),
        Arc::new(issuer),
        clock,
        ServiceSettings::from_config(&config.frogcrypto),
    ));
    service.start(&cancel).await?;
    info!(
        feeds = service.feeds().snapshot().len(),
        admins = config.frogcrypto.admin_identities.len(),
        "feed service ready"
    );

    let listener = frogcrypto_gateway::bind(&config.server).await?;
    let state = GatewayState::new(Arc::clone(&service));
    let served = frogcrypto_gateway::start_server(listener, state, cancel.clone()).await;

    // Stop the refresh task even if the server exited on its own.
    cancel.cancel();
    service.stop().await;
    if let Err(e) = storage.close().await {
        warn!(error = %e, "failed to close storage cleanly");
    }
    info!(adapter = storage.name(), "shutdown complete");
    served
}

/// The configured issuer key, or a fresh one for this process.
fn build_issuer(config: &FeedServiceConfig) -> Result<SignedRewardIssuer, FrogError> {
    let keypair = match &config.issuer_key_hex {
        Some(hex) => Keypair::from_hex(hex)?,
        None => {
            warn!(
                "no issuer_key_hex configured, using an ephemeral issuer key; \
                 rewards signed by this process cannot be traced to a stable issuer"
            );
            Keypair::generate()
        }
    };
    Ok(SignedRewardIssuer::new(keypair))
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("frogcrypto={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

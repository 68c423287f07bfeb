// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the FrogCrypto feed service.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level FrogCrypto configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FrogCryptoConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Feed service behavior.
    #[serde(default)]
    pub frogcrypto: FeedServiceConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind the server to.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3100
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable write-ahead logging.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,

    /// How long a writer waits on a locked database before failing.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("frogcrypto").join("frogcrypto.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("frogcrypto.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

fn default_busy_timeout_ms() -> u64 {
    5_000
}

/// Feed service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FeedServiceConfig {
    /// Hex-encoded identity keys allowed to call admin operations.
    #[serde(default)]
    pub admin_identities: Vec<String>,

    /// Base URL used when building reward image URLs. No trailing slash.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    /// Interval between background feed cache refreshes.
    #[serde(default = "default_feed_refresh_interval_secs")]
    pub feed_refresh_interval_secs: u64,

    /// Number of entries returned by the scoreboard.
    #[serde(default = "default_scoreboard_limit")]
    pub scoreboard_limit: u32,

    /// Lifetime of a durable per-(user, feed) reservation lease.
    #[serde(default = "default_lock_lease_secs")]
    pub lock_lease_secs: u64,

    /// Maximum age (or future skew) of a credential timestamp.
    #[serde(default = "default_credential_max_age_secs")]
    pub credential_max_age_secs: u64,

    /// Hex-encoded 32-byte Ed25519 secret for signing rewards.
    /// A fresh key is generated on startup when unset.
    #[serde(default)]
    pub issuer_key_hex: Option<String>,
}

impl Default for FeedServiceConfig {
    fn default() -> Self {
        Self {
            admin_identities: Vec::new(),
            public_base_url: default_public_base_url(),
            feed_refresh_interval_secs: default_feed_refresh_interval_secs(),
            scoreboard_limit: default_scoreboard_limit(),
            lock_lease_secs: default_lock_lease_secs(),
            credential_max_age_secs: default_credential_max_age_secs(),
            issuer_key_hex: None,
        }
    }
}

fn default_public_base_url() -> String {
    "http://localhost:3100".to_string()
}

fn default_feed_refresh_interval_secs() -> u64 {
    30
}

fn default_scoreboard_limit() -> u32 {
    50
}

fn default_lock_lease_secs() -> u64 {
    10
}

fn default_credential_max_age_secs() -> u64 {
    3600
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default level for the `frogcrypto` targets (`trace` .. `error`).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

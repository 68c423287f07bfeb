// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./frogcrypto.toml` > `~/.config/frogcrypto/frogcrypto.toml`
//! > `/etc/frogcrypto/frogcrypto.toml` with environment variable overrides via the
//! `FROGCRYPTO_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::FrogCryptoConfig;

const SYSTEM_CONFIG_PATH: &str = "/etc/frogcrypto/frogcrypto.toml";
const USER_CONFIG_SUFFIX: &str = "frogcrypto/frogcrypto.toml";
const LOCAL_CONFIG_PATH: &str = "frogcrypto.toml";

/// Config files in merge order, lowest precedence first.
pub(crate) fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(SYSTEM_CONFIG_PATH)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join(USER_CONFIG_SUFFIX));
    }
    paths.push(
        std::env::current_dir()
            .map(|d| d.join(LOCAL_CONFIG_PATH))
            .unwrap_or_else(|_| PathBuf::from(LOCAL_CONFIG_PATH)),
    );
    paths
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/frogcrypto/frogcrypto.toml` (system-wide)
/// 3. `~/.config/frogcrypto/frogcrypto.toml` (user XDG config)
/// 4. `./frogcrypto.toml` (local directory)
/// 5. `FROGCRYPTO_*` environment variables
pub fn load_config() -> Result<FrogCryptoConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<FrogCryptoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FrogCryptoConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<FrogCryptoConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(FrogCryptoConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    search_paths()
        .into_iter()
        .fold(
            Figment::new().merge(Serialized::defaults(FrogCryptoConfig::default())),
            |figment, path| figment.merge(Toml::file_exact(path)),
        )
        .merge(env_provider())
}

/// Map a prefix-stripped, lowercased env var name to its dotted config key.
///
/// Uses explicit section prefixes rather than `Env::split("_")` because key
/// names contain underscores: `FROGCRYPTO_STORAGE_DATABASE_PATH` must become
/// `storage.database_path`, not `storage.database.path`.
pub(crate) fn env_key_to_path(key: &str) -> String {
    for section in ["frogcrypto", "server", "storage", "logging"] {
        if let Some(rest) = key.strip_prefix(section).and_then(|r| r.strip_prefix('_')) {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}

fn env_provider() -> Env {
    Env::prefixed("FROGCRYPTO_").map(|key| env_key_to_path(key.as_str()).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_to_sections() {
        assert_eq!(env_key_to_path("server_port"), "server.port");
        assert_eq!(
            env_key_to_path("storage_database_path"),
            "storage.database_path"
        );
        assert_eq!(
            env_key_to_path("frogcrypto_lock_lease_secs"),
            "frogcrypto.lock_lease_secs"
        );
        assert_eq!(env_key_to_path("logging_level"), "logging.level");
    }

    #[test]
    fn search_paths_end_with_local_file() {
        let paths = search_paths();
        assert_eq!(paths[0], PathBuf::from(SYSTEM_CONFIG_PATH));
        assert!(paths.last().unwrap().ends_with(LOCAL_CONFIG_PATH));
    }

    #[test]
    fn unknown_env_keys_pass_through() {
        assert_eq!(env_key_to_path("verbose"), "verbose");
    }
}

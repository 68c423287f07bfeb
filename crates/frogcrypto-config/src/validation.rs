// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as non-empty paths, positive intervals, and well-formed identity keys.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::FrogCryptoConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &FrogCryptoConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    let service = &config.frogcrypto;

    if service.scoreboard_limit < 1 {
        errors.push(ConfigError::Validation {
            message: "frogcrypto.scoreboard_limit must be at least 1".to_string(),
        });
    }

    if service.feed_refresh_interval_secs < 1 {
        errors.push(ConfigError::Validation {
            message: "frogcrypto.feed_refresh_interval_secs must be at least 1".to_string(),
        });
    }

    if service.lock_lease_secs < 1 {
        errors.push(ConfigError::Validation {
            message: "frogcrypto.lock_lease_secs must be at least 1".to_string(),
        });
    }

    if service.credential_max_age_secs < 1 {
        errors.push(ConfigError::Validation {
            message: "frogcrypto.credential_max_age_secs must be at least 1".to_string(),
        });
    }

    let base = service.public_base_url.as_str();
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        errors.push(ConfigError::Validation {
            message: format!("frogcrypto.public_base_url `{base}` must start with http:// or https://"),
        });
    } else if base.ends_with('/') {
        errors.push(ConfigError::Validation {
            message: format!("frogcrypto.public_base_url `{base}` must not end with `/`"),
        });
    }

    let mut seen = HashSet::new();
    for (i, identity) in service.admin_identities.iter().enumerate() {
        if !is_hex_key(identity) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "frogcrypto.admin_identities[{i}] must be a 64-character hex public key"
                ),
            });
        } else if !seen.insert(identity.to_ascii_lowercase()) {
            errors.push(ConfigError::Validation {
                message: format!("duplicate admin identity `{identity}`"),
            });
        }
    }

    if let Some(key) = &service.issuer_key_hex
        && !is_hex_key(key)
    {
        errors.push(ConfigError::Validation {
            message: "frogcrypto.issuer_key_hex must be 64 hex characters".to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.logging.level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "logging.level `{}` must be one of {}",
                config.logging.level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_hex_key(value: &str) -> bool {
    value.len() == 64 && value.chars().all(|c| c.is_ascii_hexdigit())
}

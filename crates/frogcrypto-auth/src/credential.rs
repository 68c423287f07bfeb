// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Signed-timestamp credentials.
//!
//! A credential proves control of an identity key: the holder signs
//! `frogcrypto-credential:{timestamp}` with the key, and the verifier accepts
//! it only while the timestamp is within `max_age` of the current time in
//! either direction.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use frogcrypto_core::types::{AdapterType, Credential, HealthStatus, UserId};
use frogcrypto_core::{Clock, CredentialVerifier, FrogError, PluginAdapter};

use crate::keypair::{self, Keypair};

const CREDENTIAL_DOMAIN: &str = "frogcrypto-credential:";

/// The exact bytes a credential signature covers.
pub fn credential_message(timestamp: &str) -> Vec<u8> {
    format!("{CREDENTIAL_DOMAIN}{timestamp}").into_bytes()
}

/// Build a credential for `keypair`, signed at the given time.
pub fn sign_credential(keypair: &Keypair, at: DateTime<Utc>) -> Credential {
    let timestamp = at.to_rfc3339();
    let signature = keypair.sign(&credential_message(&timestamp));
    Credential {
        identity: keypair.public_hex(),
        timestamp,
        signature: hex::encode(signature.to_bytes()),
    }
}

/// Build a credential signed at the epoch-millisecond time `now_ms`.
pub fn sign_credential_at_ms(keypair: &Keypair, now_ms: i64) -> Credential {
    let at = DateTime::<Utc>::from_timestamp_millis(now_ms).unwrap_or_default();
    sign_credential(keypair, at)
}

/// Verifies Ed25519 signed-timestamp credentials.
pub struct Ed25519CredentialVerifier {
    clock: Arc<dyn Clock>,
    max_age: Duration,
}

impl Ed25519CredentialVerifier {
    pub fn new(clock: Arc<dyn Clock>, max_age: Duration) -> Self {
        Self { clock, max_age }
    }
}

#[async_trait]
impl PluginAdapter for Ed25519CredentialVerifier {
    fn name(&self) -> &str {
        "ed25519-credential"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Auth
    }

    async fn health_check(&self) -> Result<HealthStatus, FrogError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl CredentialVerifier for Ed25519CredentialVerifier {
    async fn verify(&self, credential: &Credential) -> Result<UserId, FrogError> {
        let signed_at = DateTime::parse_from_rfc3339(&credential.timestamp)
            .map_err(|e| FrogError::Authentication(format!("timestamp is not RFC 3339: {e}")))?;
        let age_ms = self
            .clock
            .now_ms()
            .saturating_sub(signed_at.timestamp_millis());
        let max_age_ms = i64::try_from(self.max_age.as_millis()).unwrap_or(i64::MAX);
        if age_ms.unsigned_abs() > max_age_ms.unsigned_abs() {
            debug!(age_ms, "credential rejected: timestamp outside window");
            return Err(FrogError::Authentication(
                "credential timestamp outside accepted window".to_string(),
            ));
        }

        let key = keypair::parse_public_key(&credential.identity)?;
        let signature = keypair::parse_signature(&credential.signature)?;
        keypair::verify_strict(&key, &credential_message(&credential.timestamp), &signature)?;

        Ok(UserId(hex::encode(key.to_bytes())))
    }
}

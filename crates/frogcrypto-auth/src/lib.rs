// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ed25519 identity credentials and reward signing.
//!
//! Users authenticate with a credential that signs the current time with their
//! identity key. The server holds its own issuer keypair and signs every
//! reward it grants.

pub mod credential;
pub mod issuer;
pub mod keypair;

pub use credential::{Ed25519CredentialVerifier, sign_credential, sign_credential_at_ms};
pub use issuer::{SignedRewardIssuer, verify_issued};
pub use keypair::Keypair;

#[cfg(test)]
mod tests {
    use frogcrypto_core::{AdapterType, PluginAdapter};

    use super::*;

    #[test]
    fn adapters_report_their_types() {
        let issuer = SignedRewardIssuer::new(Keypair::generate());
        assert_eq!(issuer.name(), "ed25519-issuer");
        assert_eq!(issuer.adapter_type(), AdapterType::Issuer);

        let verifier = Ed25519CredentialVerifier::new(
            std::sync::Arc::new(frogcrypto_core::SystemClock),
            std::time::Duration::from_secs(60),
        );
        assert_eq!(verifier.name(), "ed25519-credential");
        assert_eq!(verifier.adapter_type(), AdapterType::Auth);
    }
}

// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ed25519 keypair generation, hex encoding, and signing.

use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};
use frogcrypto_core::FrogError;
use rand::rngs::OsRng;

/// An Ed25519 keypair used for user identities and for the reward issuer.
///
/// The hex-encoded public key is the identity string carried in credentials.
pub struct Keypair {
    signing_key: SigningKey,
    verifying_key: VerifyingKey,
}

impl Keypair {
    /// Generate a new random Ed25519 keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::generate(&mut OsRng);
        Self::from_signing_key(signing_key)
    }

    /// Reconstruct a keypair from private key bytes.
    pub fn from_bytes(private_bytes: &[u8; 32]) -> Self {
        Self::from_signing_key(SigningKey::from_bytes(private_bytes))
    }

    /// Reconstruct a keypair from a 64-character hex private key.
    pub fn from_hex(private_hex: &str) -> Result<Self, FrogError> {
        let bytes = hex::decode(private_hex.trim())
            .map_err(|e| FrogError::Config(format!("issuer key is not valid hex: {e}")))?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| FrogError::Config("issuer key must be 32 bytes".to_string()))?;
        Ok(Self::from_bytes(&bytes))
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let verifying_key = VerifyingKey::from(&signing_key);
        Self {
            signing_key,
            verifying_key,
        }
    }

    /// Get the private key bytes.
    pub fn private_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }

    /// Hex-encoded private key, the form `issuer_key_hex` accepts.
    pub fn private_hex(&self) -> String {
        hex::encode(self.private_bytes())
    }

    /// Get the public key bytes.
    pub fn public_bytes(&self) -> [u8; 32] {
        self.verifying_key.to_bytes()
    }

    /// Get the hex-encoded public key.
    pub fn public_hex(&self) -> String {
        hex::encode(self.public_bytes())
    }

    /// Sign arbitrary bytes with this keypair's private key.
    pub fn sign(&self, message: &[u8]) -> Signature {
        self.signing_key.sign(message)
    }
}

/// Parse a hex-encoded Ed25519 public key.
pub fn parse_public_key(public_hex: &str) -> Result<VerifyingKey, FrogError> {
    let bytes: [u8; 32] = hex::decode(public_hex)
        .ok()
        .and_then(|b| b.try_into().ok())
        .ok_or_else(|| FrogError::Authentication("identity is not a 32-byte hex key".to_string()))?;
    VerifyingKey::from_bytes(&bytes)
        .map_err(|e| FrogError::Authentication(format!("identity is not a valid key: {e}")))
}

/// Parse a hex-encoded Ed25519 signature.
pub fn parse_signature(signature_hex: &str) -> Result<Signature, FrogError> {
    let bytes: [u8; 64] = hex::decode(signature_hex)
        .ok()
        .and_then(|b| b.try_into().ok())
        .ok_or_else(|| FrogError::Authentication("signature is not 64 hex-encoded bytes".to_string()))?;
    Ok(Signature::from_bytes(&bytes))
}

/// Verify a signature in strict mode, which rejects weak public keys.
pub fn verify_strict(
    key: &VerifyingKey,
    message: &[u8],
    signature: &Signature,
) -> Result<(), FrogError> {
    key.verify_strict(message, signature).map_err(|e| {
        FrogError::Authentication(format!("Ed25519 signature verification failed: {e}"))
    })
}

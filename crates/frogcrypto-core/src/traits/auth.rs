// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential verification trait.

use async_trait::async_trait;

use crate::error::FrogError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{Credential, UserId};

/// Verifies a caller-presented credential and resolves it to a stable user id.
///
/// Implementations must return [`FrogError::Authentication`] for any
/// credential they reject, so the caller sees a bad-request response.
#[async_trait]
pub trait CredentialVerifier: PluginAdapter {
    async fn verify(&self, credential: &Credential) -> Result<UserId, FrogError>;
}

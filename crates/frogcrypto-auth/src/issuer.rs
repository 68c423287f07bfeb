// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reward issuance: the server signs each synthesized reward with its issuer key.

use async_trait::async_trait;

use frogcrypto_core::types::{AdapterType, HealthStatus, IssuedReward, Reward, UserId};
use frogcrypto_core::{FrogError, PluginAdapter, RewardIssuer};

use crate::keypair::{self, Keypair};

/// Signs the canonical JSON form of each reward with the issuer keypair.
pub struct SignedRewardIssuer {
    keypair: Keypair,
}

impl SignedRewardIssuer {
    pub fn new(keypair: Keypair) -> Self {
        Self { keypair }
    }

    /// Hex-encoded issuer public key.
    pub fn issuer_hex(&self) -> String {
        self.keypair.public_hex()
    }
}

fn reward_bytes(reward: &Reward) -> Result<Vec<u8>, FrogError> {
    serde_json::to_vec(reward)
        .map_err(|e| FrogError::Internal(format!("failed to serialize reward: {e}")))
}

/// Check that `issued` was signed by its stated issuer over its exact reward.
pub fn verify_issued(issued: &IssuedReward) -> Result<(), FrogError> {
    let key = keypair::parse_public_key(&issued.issuer)?;
    let signature = keypair::parse_signature(&issued.signature)?;
    keypair::verify_strict(&key, &reward_bytes(&issued.reward)?, &signature)
}

#[async_trait]
impl PluginAdapter for SignedRewardIssuer {
    fn name(&self) -> &str {
        "ed25519-issuer"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Issuer
    }

    async fn health_check(&self) -> Result<HealthStatus, FrogError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl RewardIssuer for SignedRewardIssuer {
    async fn issue(&self, reward: Reward, recipient: &UserId) -> Result<IssuedReward, FrogError> {
        if reward.owner_id != recipient.as_str() {
            return Err(FrogError::Internal(format!(
                "reward owner {} does not match recipient {recipient}",
                reward.owner_id
            )));
        }
        let signature = self.keypair.sign(&reward_bytes(&reward)?);
        Ok(IssuedReward {
            reward,
            signature: hex::encode(signature.to_bytes()),
            issuer: self.issuer_hex(),
        })
    }
}

#[cfg(test)]
mod tests {
    use frogcrypto_core::types::{Biome, Rarity, Temperament};

    use super::*;

    fn reward(owner: &str) -> Reward {
        Reward {
            item_id: 7,
            name: "Tree Frog".to_string(),
            description: "Clings".to_string(),
            image_url: "http://localhost/frogcrypto/images/uuid-7".to_string(),
            biome: Biome::Jungle,
            rarity: Rarity::Rare,
            temperament: Temperament::Calm,
            jump: 3,
            speed: 4,
            intelligence: 5,
            beauty: 6,
            timestamp_signed: 1_700_000_000_000,
            owner_id: owner.to_string(),
        }
    }

    #[tokio::test]
    async fn issued_reward_verifies() {
        let issuer = SignedRewardIssuer::new(Keypair::generate());
        let issued = issuer
            .issue(reward("alice"), &UserId("alice".to_string()))
            .await
            .unwrap();
        assert_eq!(issued.issuer, issuer.issuer_hex());
        verify_issued(&issued).unwrap();
    }

    #[tokio::test]
    async fn tampered_reward_fails_verification() {
        let issuer = SignedRewardIssuer::new(Keypair::generate());
        let mut issued = issuer
            .issue(reward("alice"), &UserId("alice".to_string()))
            .await
            .unwrap();
        issued.reward.beauty = 15;
        assert!(verify_issued(&issued).is_err());
    }

    #[tokio::test]
    async fn recipient_mismatch_is_rejected() {
        let issuer = SignedRewardIssuer::new(Keypair::generate());
        let err = issuer
            .issue(reward("alice"), &UserId("bob".to_string()))
            .await
            .unwrap_err();
        assert!(!err.is_expected());
    }
}

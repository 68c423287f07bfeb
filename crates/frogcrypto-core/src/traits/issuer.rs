// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reward issuance trait.

use async_trait::async_trait;

use crate::error::FrogError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{IssuedReward, Reward, UserId};

/// Packages a synthesized reward into a portable credential for its recipient.
#[async_trait]
pub trait RewardIssuer: PluginAdapter {
    async fn issue(&self, reward: Reward, recipient: &UserId) -> Result<IssuedReward, FrogError>;
}

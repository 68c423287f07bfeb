// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the FrogCrypto service.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Stable identifier of a verified user (the hex-encoded identity key).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of adapter plugged into the service.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Storage,
    Auth,
    Issuer,
}

// --- Public enumerations ---

/// Habitat category of an item. Feeds select items by biome.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
pub enum Biome {
    Unknown,
    Jungle,
    Desert,
    Swamp,
    TheCapital,
    Celestial,
    TheWrithingVoid,
    CrystalFacility,
}

/// Rarity tier of an item.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum Rarity {
    Unknown,
    Common,
    Rare,
    Epic,
    Legendary,
    Mythic,
    /// Non-collectible items; never counted towards completion.
    Object,
}

/// Behavioral trait rolled onto each reward.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum Temperament {
    #[strum(serialize = "UNKNOWN")]
    #[serde(rename = "UNKNOWN")]
    Unknown,
    #[strum(serialize = "N/A")]
    #[serde(rename = "N/A")]
    NotApplicable,
    #[strum(serialize = "HNGY")]
    #[serde(rename = "HNGY")]
    Hungry,
    #[strum(serialize = "OPEN")]
    #[serde(rename = "OPEN")]
    Open,
    #[strum(serialize = "SLPY")]
    #[serde(rename = "SLPY")]
    Sleepy,
    #[strum(serialize = "CALM")]
    #[serde(rename = "CALM")]
    Calm,
    #[strum(serialize = "DARK")]
    #[serde(rename = "DARK")]
    Dark,
    #[strum(serialize = "COOL")]
    #[serde(rename = "COOL")]
    Cool,
}

// --- Item definitions ---

/// Inclusive integer range an attribute is rolled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeRange {
    pub min: i64,
    pub max: i64,
}

impl AttributeRange {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// A reward item definition as stored by admins.
///
/// `biome` and `rarity` are kept as the stored codes; they are mapped to the
/// public enums only when a reward is synthesized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    /// Content reference used to build the image URL.
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub biome: String,
    pub rarity: String,
    /// Temperament code -> relative weight.
    #[serde(default)]
    pub temperament_weights: BTreeMap<String, f64>,
    pub drop_weight: f64,
    pub jump: AttributeRange,
    pub speed: AttributeRange,
    pub intelligence: AttributeRange,
    pub beauty: AttributeRange,
}

impl Item {
    /// First reason this item cannot be turned into a reward, if any.
    ///
    /// Checks the biome, rarity, and temperament codes and that every
    /// attribute range has `min <= max`.
    pub fn integrity_problem(&self) -> Option<String> {
        if self.biome.parse::<Biome>().is_err() {
            return Some(format!("item {} has unknown biome `{}`", self.id, self.biome));
        }
        if self.rarity.parse::<Rarity>().is_err() {
            return Some(format!("item {} has unknown rarity `{}`", self.id, self.rarity));
        }
        if let Some(code) = self
            .temperament_weights
            .keys()
            .find(|code| code.parse::<Temperament>().is_err())
        {
            return Some(format!("item {} has unknown temperament `{code}`", self.id));
        }
        [
            ("jump", self.jump),
            ("speed", self.speed),
            ("intelligence", self.intelligence),
            ("beauty", self.beauty),
        ]
        .into_iter()
        .find(|(_, range)| range.min > range.max)
        .map(|(attribute, range)| {
            format!(
                "item {} has {attribute} range {}..={}",
                self.id, range.min, range.max
            )
        })
    }
}

// --- Feeds ---

/// Per-category weight multiplier inside a feed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeight {
    pub drop_weight_scaler: f64,
}

/// A feed configuration. Also the summary shape returned by feed listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub private: bool,
    /// Epoch seconds; the feed is servable only while `now < active_until`.
    pub active_until: i64,
    pub cooldown_secs: i64,
    /// Eligible categories. Categories not listed are never sampled.
    #[serde(default)]
    pub categories: BTreeMap<Biome, CategoryWeight>,
}

impl FeedDefinition {
    /// Whether the feed can be polled at `now_ms` (epoch milliseconds).
    pub fn is_active_at(&self, now_ms: i64) -> bool {
        self.active_until.saturating_mul(1000) > now_ms
    }

    /// Epoch milliseconds at which the next grant becomes possible.
    pub fn next_eligible_at(&self, last_granted_at: i64) -> i64 {
        last_granted_at.saturating_add(self.cooldown_ms())
    }

    pub fn cooldown_ms(&self) -> i64 {
        self.cooldown_secs.saturating_mul(1000)
    }

    /// Stored category codes paired with their weight scalers.
    pub fn category_scalers(&self) -> BTreeMap<String, f64> {
        self.categories
            .iter()
            .map(|(biome, weight)| (biome.to_string(), weight.drop_weight_scaler))
            .collect()
    }
}

// --- Per-user state ---

/// Durable reservation state of one (user, feed) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFeedState {
    pub user_id: String,
    pub feed_id: String,
    /// Epoch milliseconds of the last grant; `0` means never.
    pub last_granted_at: i64,
}

/// User-facing view of a (user, feed) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputedUserFeedState {
    pub feed_id: String,
    pub last_granted_at: i64,
    pub next_eligible_at: i64,
    pub active: bool,
}

impl ComputedUserFeedState {
    pub fn compute(state: &UserFeedState, feed: &FeedDefinition, now_ms: i64) -> Self {
        Self {
            feed_id: feed.id.clone(),
            last_granted_at: state.last_granted_at,
            next_eligible_at: feed.next_eligible_at(state.last_granted_at),
            active: feed.is_active_at(now_ms),
        }
    }
}

/// A user's score with its leaderboard rank (1 = best).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub user_id: String,
    pub score: i64,
    pub rank: i64,
}

/// Everything a client needs to render a user's progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserState {
    pub feeds: Vec<ComputedUserFeedState>,
    pub possible_item_ids: Vec<i64>,
    pub score: Option<Score>,
}

// --- Rewards ---

/// A per-grant instantiation of a sampled item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub item_id: i64,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub biome: Biome,
    pub rarity: Rarity,
    pub temperament: Temperament,
    pub jump: i64,
    pub speed: i64,
    pub intelligence: i64,
    pub beauty: i64,
    /// Epoch milliseconds of issuance.
    pub timestamp_signed: i64,
    pub owner_id: String,
}

/// A reward packaged by a [`RewardIssuer`](crate::RewardIssuer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedReward {
    pub reward: Reward,
    /// Hex-encoded signature over the serialized reward.
    pub signature: String,
    /// Hex-encoded public key of the issuer.
    pub issuer: String,
}

// --- Credentials ---

/// A caller-presented credential, verified by a
/// [`CredentialVerifier`](crate::CredentialVerifier).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Hex-encoded identity public key.
    pub identity: String,
    /// RFC 3339 timestamp the signature covers.
    pub timestamp: String,
    /// Hex-encoded signature.
    pub signature: String,
}

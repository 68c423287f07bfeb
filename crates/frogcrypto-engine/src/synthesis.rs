// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turning a sampled item into a concrete reward.

use std::str::FromStr;

use rand::Rng;

use frogcrypto_core::FrogError;
use frogcrypto_core::sampling::{pick_weighted, roll_attribute};
use frogcrypto_core::types::{AttributeRange, Biome, Item, Rarity, Reward, Temperament, UserId};

/// Image location for an item's content reference.
pub fn image_url(public_base_url: &str, uuid: &str) -> String {
    format!("{public_base_url}/frogcrypto/images/{uuid}")
}

fn roll<R: Rng + ?Sized>(
    item: &Item,
    attribute: &str,
    range: AttributeRange,
    rng: &mut R,
) -> Result<i64, FrogError> {
    roll_attribute(range, rng).ok_or_else(|| {
        FrogError::DataIntegrity(format!(
            "item {} has {attribute} range {}..={}",
            item.id, range.min, range.max
        ))
    })
}

/// Draw a temperament from the item's weights. No positive weight yields `UNKNOWN`.
pub fn roll_temperament<R: Rng + ?Sized>(item: &Item, rng: &mut R) -> Result<Temperament, FrogError> {
    let weights: Vec<(&String, f64)> = item
        .temperament_weights
        .iter()
        .map(|(code, weight)| (code, *weight))
        .collect();
    match pick_weighted(&weights, |(_, weight)| *weight, rng) {
        Some(index) => {
            let code = weights[index].0;
            Temperament::from_str(code).map_err(|_| {
                FrogError::DataIntegrity(format!("item {} has unknown temperament `{code}`", item.id))
            })
        }
        None => Ok(Temperament::Unknown),
    }
}

/// Build a reward for `owner` from `item`, with freshly rolled attributes.
pub fn synthesize_reward<R: Rng + ?Sized>(
    item: &Item,
    owner: &UserId,
    public_base_url: &str,
    issued_at_ms: i64,
    rng: &mut R,
) -> Result<Reward, FrogError> {
    let biome = Biome::from_str(&item.biome).map_err(|_| {
        FrogError::DataIntegrity(format!("item {} has unknown biome `{}`", item.id, item.biome))
    })?;
    let rarity = Rarity::from_str(&item.rarity).map_err(|_| {
        FrogError::DataIntegrity(format!("item {} has unknown rarity `{}`", item.id, item.rarity))
    })?;

    Ok(Reward {
        item_id: item.id,
        name: item.name.clone(),
        description: item.description.clone(),
        image_url: image_url(public_base_url, &item.uuid),
        biome,
        rarity,
        temperament: roll_temperament(item, rng)?,
        jump: roll(item, "jump", item.jump, rng)?,
        speed: roll(item, "speed", item.speed, rng)?,
        intelligence: roll(item, "intelligence", item.intelligence, rng)?,
        beauty: roll(item, "beauty", item.beauty, rng)?,
        timestamp_signed: issued_at_ms,
        owner_id: owner.to_string(),
    })
}

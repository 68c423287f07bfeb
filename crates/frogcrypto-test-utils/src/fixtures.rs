// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Item and feed fixtures.

use std::collections::BTreeMap;

use frogcrypto_core::types::{AttributeRange, Biome, CategoryWeight, FeedDefinition, Item};

/// Default start time for harness clocks (2023-11-14T22:13:20Z).
pub const T0: i64 = 1_700_000_000_000;

/// `active_until` for feeds that never lapse in tests (2100-01-01).
pub const FAR_FUTURE_SECS: i64 = 4_102_444_800;

/// A `Common` item of `biome` with full 0..=15 attribute ranges.
pub fn item(id: i64, biome: Biome, drop_weight: f64) -> Item {
    Item {
        id,
        uuid: format!("00000000-0000-4000-8000-{id:012}"),
        name: format!("Frog {id}"),
        description: format!("Test frog number {id}"),
        biome: biome.to_string(),
        rarity: "Common".to_string(),
        temperament_weights: BTreeMap::from([
            ("CALM".to_string(), 1.0),
            ("HNGY".to_string(), 1.0),
        ]),
        drop_weight,
        jump: AttributeRange::new(0, 15),
        speed: AttributeRange::new(0, 15),
        intelligence: AttributeRange::new(0, 15),
        beauty: AttributeRange::new(0, 15),
    }
}

/// A public, never-lapsing feed over `categories` with unit scalers.
pub fn feed(id: &str, categories: &[Biome], cooldown_secs: i64) -> FeedDefinition {
    FeedDefinition {
        id: id.to_string(),
        name: format!("{id} feed"),
        description: String::new(),
        private: false,
        active_until: FAR_FUTURE_SECS,
        cooldown_secs,
        categories: categories
            .iter()
            .map(|biome| {
                (
                    *biome,
                    CategoryWeight {
                        drop_weight_scaler: 1.0,
                    },
                )
            })
            .collect(),
    }
}

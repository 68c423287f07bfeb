// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Item definition CRUD and eligible-pool selection.

use std::collections::BTreeMap;

use frogcrypto_core::FrogError;
use frogcrypto_core::types::{AttributeRange, Item};
use rusqlite::types::Type;
use rusqlite::{Connection, Row, params, params_from_iter};

use crate::database::Database;

const ITEM_COLUMNS: &str = "id, uuid, name, description, biome, rarity, temperament_weights,
     drop_weight, jump_min, jump_max, speed_min, speed_max,
     intelligence_min, intelligence_max, beauty_min, beauty_max";

const NON_COLLECTIBLE_RARITY: &str = "Object";

fn item_from_row(row: &Row<'_>) -> rusqlite::Result<Item> {
    let weights: String = row.get(6)?;
    let temperament_weights: BTreeMap<String, f64> = serde_json::from_str(&weights)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?;
    Ok(Item {
        id: row.get(0)?,
        uuid: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        biome: row.get(4)?,
        rarity: row.get(5)?,
        temperament_weights,
        drop_weight: row.get(7)?,
        jump: AttributeRange::new(row.get(8)?, row.get(9)?),
        speed: AttributeRange::new(row.get(10)?, row.get(11)?),
        intelligence: AttributeRange::new(row.get(12)?, row.get(13)?),
        beauty: AttributeRange::new(row.get(14)?, row.get(15)?),
    })
}

/// Insert or replace items by id in one transaction.
pub async fn upsert_items(db: &Database, items: &[Item]) -> Result<(), FrogError> {
    let items = items.to_vec();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare(&format!(
                    "INSERT INTO items ({ITEM_COLUMNS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)
                     ON CONFLICT(id) DO UPDATE SET
                        uuid = excluded.uuid,
                        name = excluded.name,
                        description = excluded.description,
                        biome = excluded.biome,
                        rarity = excluded.rarity,
                        temperament_weights = excluded.temperament_weights,
                        drop_weight = excluded.drop_weight,
                        jump_min = excluded.jump_min,
                        jump_max = excluded.jump_max,
                        speed_min = excluded.speed_min,
                        speed_max = excluded.speed_max,
                        intelligence_min = excluded.intelligence_min,
                        intelligence_max = excluded.intelligence_max,
                        beauty_min = excluded.beauty_min,
                        beauty_max = excluded.beauty_max"
                ))?;
                for item in &items {
                    let weights = serde_json::to_string(&item.temperament_weights)
                        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
                    stmt.execute(params![
                        item.id,
                        item.uuid,
                        item.name,
                        item.description,
                        item.biome,
                        item.rarity,
                        weights,
                        item.drop_weight,
                        item.jump.min,
                        item.jump.max,
                        item.speed.min,
                        item.speed.max,
                        item.intelligence.min,
                        item.intelligence.max,
                        item.beauty.min,
                        item.beauty.max,
                    ])?;
                }
            }
            tx.commit()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete items by id in one transaction. Unknown ids are ignored.
pub async fn delete_items(db: &Database, ids: &[i64]) -> Result<(), FrogError> {
    let ids = ids.to_vec();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare("DELETE FROM items WHERE id = ?1")?;
                for id in &ids {
                    stmt.execute(params![id])?;
                }
            }
            tx.commit()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// All items ordered by id.
pub async fn list_items(db: &Database) -> Result<Vec<Item>, FrogError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(&format!("SELECT {ITEM_COLUMNS} FROM items ORDER BY id"))?;
            let rows = stmt.query_map([], item_from_row)?;
            rows.collect::<Result<Vec<_>, _>>()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Ids of collectible items, ascending.
pub async fn possible_item_ids(db: &Database) -> Result<Vec<i64>, FrogError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare("SELECT id FROM items WHERE rarity != ?1 ORDER BY id")?;
            let rows = stmt.query_map(params![NON_COLLECTIBLE_RARITY], |row| row.get(0))?;
            rows.collect::<Result<Vec<i64>, _>>()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Items whose biome is one of `biomes`, ordered by id.
///
/// Runs on the caller's connection so it can take part in the grant transaction.
pub(crate) fn eligible_items(conn: &Connection, biomes: &[String]) -> rusqlite::Result<Vec<Item>> {
    if biomes.is_empty() {
        return Ok(Vec::new());
    }
    let placeholders = vec!["?"; biomes.len()].join(", ");
    let mut stmt = conn.prepare(&format!(
        "SELECT {ITEM_COLUMNS} FROM items WHERE biome IN ({placeholders}) ORDER BY id"
    ))?;
    let rows = stmt.query_map(params_from_iter(biomes.iter()), item_from_row)?;
    rows.collect()
}

// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Feed definition CRUD.

use frogcrypto_core::FrogError;
use frogcrypto_core::types::FeedDefinition;
use rusqlite::params;
use rusqlite::types::Type;

use crate::database::Database;

/// Insert or replace feeds by id in one transaction.
pub async fn upsert_feeds(db: &Database, feeds: &[FeedDefinition]) -> Result<(), FrogError> {
    let feeds = feeds.to_vec();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare(
                    "INSERT INTO feeds (id, name, description, private, active_until, cooldown_secs, categories)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                     ON CONFLICT(id) DO UPDATE SET
                        name = excluded.name,
                        description = excluded.description,
                        private = excluded.private,
                        active_until = excluded.active_until,
                        cooldown_secs = excluded.cooldown_secs,
                        categories = excluded.categories",
                )?;
                for feed in &feeds {
                    let categories = serde_json::to_string(&feed.categories)
                        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
                    stmt.execute(params![
                        feed.id,
                        feed.name,
                        feed.description,
                        feed.private,
                        feed.active_until,
                        feed.cooldown_secs,
                        categories,
                    ])?;
                }
            }
            tx.commit()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// All feeds ordered by id.
pub async fn list_feeds(db: &Database) -> Result<Vec<FeedDefinition>, FrogError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, description, private, active_until, cooldown_secs, categories
                 FROM feeds ORDER BY id",
            )?;
            let rows = stmt.query_map([], |row| {
                let categories: String = row.get(6)?;
                Ok(FeedDefinition {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    description: row.get(2)?,
                    private: row.get(3)?,
                    active_until: row.get(4)?,
                    cooldown_secs: row.get(5)?,
                    categories: serde_json::from_str(&categories).map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e))
                    })?,
                })
            })?;
            rows.collect::<Result<Vec<_>, _>>()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use frogcrypto_config::model::StorageConfig;
    use frogcrypto_core::types::{Biome, CategoryWeight};
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let config = StorageConfig {
            database_path: dir.path().join("feeds.db").to_string_lossy().into_owned(),
            wal_mode: true,
            busy_timeout_ms: 1_000,
        };
        let db = Database::open(&config).await.unwrap();
        (db, dir)
    }

    fn feed(id: &str, cooldown_secs: i64) -> FeedDefinition {
        FeedDefinition {
            id: id.to_string(),
            name: id.to_uppercase(),
            description: String::new(),
            private: false,
            active_until: 4_102_444_800,
            cooldown_secs,
            categories: BTreeMap::from([
                (Biome::Jungle, CategoryWeight { drop_weight_scaler: 1.0 }),
                (Biome::TheCapital, CategoryWeight { drop_weight_scaler: 0.25 }),
            ]),
        }
    }

    #[tokio::test]
    async fn feeds_roundtrip_with_categories() {
        let (db, _dir) = setup_db().await;
        upsert_feeds(&db, &[feed("b", 60), feed("a", 600)]).await.unwrap();

        let feeds = list_feeds(&db).await.unwrap();
        assert_eq!(feeds, vec![feed("a", 600), feed("b", 60)]);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn upsert_updates_cooldown_in_place() {
        let (db, _dir) = setup_db().await;
        upsert_feeds(&db, &[feed("a", 60)]).await.unwrap();
        upsert_feeds(&db, &[feed("a", 5)]).await.unwrap();

        let feeds = list_feeds(&db).await.unwrap();
        assert_eq!(feeds.len(), 1);
        assert_eq!(feeds[0].cooldown_secs, 5);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn empty_categories_are_preserved() {
        let (db, _dir) = setup_db().await;
        let mut empty = feed("empty", 60);
        empty.categories.clear();
        upsert_feeds(&db, &[empty.clone()]).await.unwrap();

        assert_eq!(list_feeds(&db).await.unwrap(), vec![empty]);
        db.close().await.unwrap();
    }
}

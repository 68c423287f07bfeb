// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Score counters and leaderboard ranking.
//!
//! Rank is competition style: users with equal scores share a rank and the
//! next distinct score skips ahead (1, 1, 3).

use frogcrypto_core::FrogError;
use frogcrypto_core::types::Score;
use rusqlite::{Connection, OptionalExtension, params};

use crate::database::Database;

/// Add one to a user's score, creating the row on first grant.
pub(crate) fn increment_score(conn: &Connection, user_id: &str) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO scores (user_id, score) VALUES (?1, 1)
         ON CONFLICT(user_id) DO UPDATE SET score = score + 1",
        params![user_id],
    )?;
    Ok(())
}

/// A user's score and rank, `None` if the user has never been granted anything.
pub async fn get_score(db: &Database, user_id: &str) -> Result<Option<Score>, FrogError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            conn.query_row(
                "SELECT s.user_id, s.score,
                        (SELECT COUNT(*) FROM scores o WHERE o.score > s.score) + 1
                 FROM scores s WHERE s.user_id = ?1",
                params![user_id],
                |row| {
                    Ok(Score {
                        user_id: row.get(0)?,
                        score: row.get(1)?,
                        rank: row.get(2)?,
                    })
                },
            )
            .optional()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Highest scores first, ties broken by user id.
pub async fn scoreboard(db: &Database, limit: usize) -> Result<Vec<Score>, FrogError> {
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT user_id, score, RANK() OVER (ORDER BY score DESC) AS rank
                 FROM scores
                 ORDER BY score DESC, user_id ASC
                 LIMIT ?1",
            )?;
            let rows = stmt.query_map(params![limit], |row| {
                Ok(Score {
                    user_id: row.get(0)?,
                    score: row.get(1)?,
                    rank: row.get(2)?,
                })
            })?;
            rows.collect::<Result<Vec<_>, _>>()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use frogcrypto_config::model::StorageConfig;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let config = StorageConfig {
            database_path: dir.path().join("scores.db").to_string_lossy().into_owned(),
            wal_mode: true,
            busy_timeout_ms: 1_000,
        };
        let db = Database::open(&config).await.unwrap();
        (db, dir)
    }

    async fn bump(db: &Database, user: &'static str, times: usize) {
        db.connection()
            .call(move |conn| {
                for _ in 0..times {
                    increment_score(conn, user)?;
                }
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)
            .unwrap();
    }

    #[tokio::test]
    async fn missing_user_has_no_score() {
        let (db, _dir) = setup_db().await;
        assert_eq!(get_score(&db, "nobody").await.unwrap(), None);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn increments_accumulate() {
        let (db, _dir) = setup_db().await;
        bump(&db, "alice", 3).await;
        let score = get_score(&db, "alice").await.unwrap().unwrap();
        assert_eq!(score.score, 3);
        assert_eq!(score.rank, 1);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn ties_share_rank() {
        let (db, _dir) = setup_db().await;
        bump(&db, "alice", 2).await;
        bump(&db, "bob", 2).await;
        bump(&db, "carol", 1).await;

        let board = scoreboard(&db, 10).await.unwrap();
        let ranks: Vec<(&str, i64, i64)> = board
            .iter()
            .map(|s| (s.user_id.as_str(), s.score, s.rank))
            .collect();
        assert_eq!(ranks, vec![("alice", 2, 1), ("bob", 2, 1), ("carol", 1, 3)]);
        assert_eq!(get_score(&db, "carol").await.unwrap().unwrap().rank, 3);
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn scoreboard_respects_limit() {
        let (db, _dir) = setup_db().await;
        bump(&db, "alice", 3).await;
        bump(&db, "bob", 2).await;
        bump(&db, "carol", 1).await;

        let board = scoreboard(&db, 2).await.unwrap();
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].user_id, "alice");
        db.close().await.unwrap();
    }
}

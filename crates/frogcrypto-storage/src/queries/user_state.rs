// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-(user, feed) reservation state: idempotent init, the row lease, and
//! the grant transaction.
//!
//! The lease is the store-level mutual exclusion primitive. Taking it is a
//! single conditional `UPDATE` that only matches a free or expired row, so a
//! held row is reported immediately instead of queuing behind the holder.
//! The grant re-checks lease ownership inside an `IMMEDIATE` transaction and
//! clears the lease in the same write that advances `last_granted_at`.

use frogcrypto_core::types::{Item, UserFeedState};
use frogcrypto_core::{FeedLease, FrogError, GrantRequest};
use rusqlite::{OptionalExtension, TransactionBehavior, params};
use tracing::debug;

use crate::database::Database;
use crate::queries::{items, scores};

/// Create the state row at epoch zero unless it already exists.
pub async fn init_user_feed_state(
    db: &Database,
    user_id: &str,
    feed_id: &str,
) -> Result<(), FrogError> {
    let user_id = user_id.to_string();
    let feed_id = feed_id.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO user_feed_state (user_id, feed_id, last_granted_at)
                 VALUES (?1, ?2, 0)
                 ON CONFLICT(user_id, feed_id) DO NOTHING",
                params![user_id, feed_id],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// All state rows of a user, ordered by feed id.
pub async fn list_user_feed_states(
    db: &Database,
    user_id: &str,
) -> Result<Vec<UserFeedState>, FrogError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT user_id, feed_id, last_granted_at FROM user_feed_state
                 WHERE user_id = ?1 ORDER BY feed_id",
            )?;
            let rows = stmt.query_map(params![user_id], |row| {
                Ok(UserFeedState {
                    user_id: row.get(0)?,
                    feed_id: row.get(1)?,
                    last_granted_at: row.get(2)?,
                })
            })?;
            rows.collect::<Result<Vec<_>, _>>()
        })
        .await
        .map_err(crate::database::map_tr_err)
}

enum LockOutcome {
    Acquired(i64),
    Held,
    Missing,
}

/// Take the lease without waiting and return the row's `last_granted_at`.
pub async fn lock_user_feed_state(db: &Database, lease: &FeedLease) -> Result<i64, FrogError> {
    let l = lease.clone();
    let outcome = db
        .connection()
        .call(move |conn| {
            let acquired: Option<i64> = conn
                .query_row(
                    "UPDATE user_feed_state
                     SET locked_by = ?3, locked_until = ?4
                     WHERE user_id = ?1 AND feed_id = ?2
                       AND (locked_by IS NULL OR locked_until <= ?5)
                     RETURNING last_granted_at",
                    params![l.user_id, l.feed_id, l.holder, l.expires_at, l.acquired_at],
                    |row| row.get(0),
                )
                .optional()?;
            if let Some(last_granted_at) = acquired {
                return Ok(LockOutcome::Acquired(last_granted_at));
            }
            let exists = conn
                .query_row(
                    "SELECT 1 FROM user_feed_state WHERE user_id = ?1 AND feed_id = ?2",
                    params![l.user_id, l.feed_id],
                    |_| Ok(()),
                )
                .optional()?
                .is_some();
            Ok(if exists {
                LockOutcome::Held
            } else {
                LockOutcome::Missing
            })
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    match outcome {
        LockOutcome::Acquired(last_granted_at) => Ok(last_granted_at),
        LockOutcome::Held => {
            debug!(user_id = %lease.user_id, feed_id = %lease.feed_id, "state row already leased");
            Err(FrogError::LockContention {
                feed_id: lease.feed_id.clone(),
            })
        }
        LockOutcome::Missing => Err(FrogError::DataIntegrity(format!(
            "no state row for feed {} and user {}",
            lease.feed_id, lease.user_id
        ))),
    }
}

/// Drop the lease if the holder still owns it.
pub async fn release_user_feed_state(db: &Database, lease: &FeedLease) -> Result<(), FrogError> {
    let l = lease.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE user_feed_state SET locked_by = NULL, locked_until = NULL
                 WHERE user_id = ?1 AND feed_id = ?2 AND locked_by = ?3",
                params![l.user_id, l.feed_id, l.holder],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

enum GrantOutcome {
    Granted(Item),
    LeaseLost,
    Cooldown { next_eligible_at: i64 },
    Exhausted,
    Integrity(String),
}

/// Check the cooldown, sample an item, bump the score, and advance the row,
/// all in one `IMMEDIATE` transaction. Any non-granted outcome rolls back,
/// including a sampled item that could not be turned into a reward.
pub async fn commit_grant(db: &Database, grant: GrantRequest) -> Result<Item, FrogError> {
    let feed_id = grant.lease.feed_id.clone();
    let outcome = db
        .connection()
        .call(move |conn| {
            let lease = &grant.lease;
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

            let row: Option<(i64, Option<String>)> = tx
                .query_row(
                    "SELECT last_granted_at, locked_by FROM user_feed_state
                     WHERE user_id = ?1 AND feed_id = ?2",
                    params![lease.user_id, lease.feed_id],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )
                .optional()?;
            let last_granted_at = match row {
                Some((last, Some(holder))) if holder == lease.holder => last,
                _ => return Ok(GrantOutcome::LeaseLost),
            };

            let next_eligible_at = last_granted_at.saturating_add(grant.cooldown_ms);
            if grant.granted_at < next_eligible_at {
                return Ok(GrantOutcome::Cooldown { next_eligible_at });
            }

            let biomes: Vec<String> = grant.category_scalers.keys().cloned().collect();
            let candidates = items::eligible_items(&tx, &biomes)?;
            let mut rng = rand::thread_rng();
            let picked = frogcrypto_core::sampling::pick_weighted(
                &candidates,
                |item| {
                    let scaler = grant.category_scalers.get(&item.biome).copied().unwrap_or(0.0);
                    item.drop_weight * scaler
                },
                &mut rng,
            );
            let Some(index) = picked else {
                return Ok(GrantOutcome::Exhausted);
            };
            if let Some(problem) = candidates[index].integrity_problem() {
                return Ok(GrantOutcome::Integrity(problem));
            }

            scores::increment_score(&tx, &lease.user_id)?;
            let advanced = tx.execute(
                "UPDATE user_feed_state
                 SET last_granted_at = ?3, locked_by = NULL, locked_until = NULL
                 WHERE user_id = ?1 AND feed_id = ?2 AND locked_by = ?4 AND last_granted_at = ?5",
                params![
                    lease.user_id,
                    lease.feed_id,
                    grant.granted_at,
                    lease.holder,
                    last_granted_at
                ],
            )?;
            if advanced != 1 {
                return Ok(GrantOutcome::LeaseLost);
            }
            tx.commit()?;
            Ok(GrantOutcome::Granted(candidates[index].clone()))
        })
        .await
        .map_err(crate::database::map_tr_err)?;

    match outcome {
        GrantOutcome::Granted(item) => Ok(item),
        GrantOutcome::LeaseLost => Err(FrogError::LockContention { feed_id }),
        GrantOutcome::Cooldown { next_eligible_at } => {
            Err(FrogError::CooldownNotElapsed { next_eligible_at })
        }
        GrantOutcome::Exhausted => Err(FrogError::ItemPoolExhausted { feed_id }),
        GrantOutcome::Integrity(problem) => Err(FrogError::DataIntegrity(problem)),
    }
}

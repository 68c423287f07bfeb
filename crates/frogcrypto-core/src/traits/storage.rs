// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter trait for persistence backends (SQLite, etc.).

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::FrogError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{FeedDefinition, Item, Score, UserFeedState};

/// A short-lived exclusive claim on one (user, feed) state row.
///
/// The holder token is unique per reservation attempt. A lease that outlives
/// `expires_at` may be taken over by another attempt, so a crashed process
/// cannot block a row forever.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedLease {
    pub user_id: String,
    pub feed_id: String,
    pub holder: String,
    /// Epoch milliseconds at which the lease was requested.
    pub acquired_at: i64,
    /// Epoch milliseconds after which the lease is considered abandoned.
    pub expires_at: i64,
}

/// Everything the store needs to perform the atomic grant step.
#[derive(Debug, Clone)]
pub struct GrantRequest {
    pub lease: FeedLease,
    /// Epoch milliseconds recorded as the new `last_granted_at`.
    pub granted_at: i64,
    pub cooldown_ms: i64,
    /// Eligible category code -> weight scaler.
    pub category_scalers: BTreeMap<String, f64>,
}

/// Adapter for storage and persistence backends.
///
/// Besides plain CRUD, the adapter owns the two concurrency primitives of the
/// reservation flow: the non-blocking row lease
/// ([`lock_user_feed_state`](StorageAdapter::lock_user_feed_state)) and the
/// atomic grant ([`commit_grant`](StorageAdapter::commit_grant)).
#[async_trait]
pub trait StorageAdapter: PluginAdapter {
    /// Initializes the storage backend (migrations, connection, etc.).
    async fn initialize(&self) -> Result<(), FrogError>;

    /// Closes the storage backend, flushing pending writes.
    async fn close(&self) -> Result<(), FrogError>;

    // --- Items ---

    /// Insert or replace item definitions by id, all or nothing.
    async fn upsert_items(&self, items: &[Item]) -> Result<(), FrogError>;

    /// Delete item definitions by id. Unknown ids are ignored.
    async fn delete_items(&self, ids: &[i64]) -> Result<(), FrogError>;

    /// All item definitions ordered by id.
    async fn list_items(&self) -> Result<Vec<Item>, FrogError>;

    /// Ids of collectible items (everything but `Object` rarity), ascending.
    async fn possible_item_ids(&self) -> Result<Vec<i64>, FrogError>;

    // --- Feeds ---

    /// Insert or replace feed definitions by id, all or nothing.
    async fn upsert_feeds(&self, feeds: &[FeedDefinition]) -> Result<(), FrogError>;

    /// All feed definitions ordered by id.
    async fn list_feeds(&self) -> Result<Vec<FeedDefinition>, FrogError>;

    // --- User feed state ---

    /// Create the state row with `last_granted_at = 0` if it does not exist.
    /// Never resets an existing row.
    async fn init_user_feed_state(&self, user_id: &str, feed_id: &str) -> Result<(), FrogError>;

    /// All state rows of one user ordered by feed id.
    async fn list_user_feed_states(&self, user_id: &str)
    -> Result<Vec<UserFeedState>, FrogError>;

    /// Try to take the lease without waiting.
    ///
    /// Returns the row's `last_granted_at` on success and
    /// [`FrogError::LockContention`] when another live lease holds the row.
    async fn lock_user_feed_state(&self, lease: &FeedLease) -> Result<i64, FrogError>;

    /// Drop the lease if `lease.holder` still owns it. Idempotent.
    async fn release_user_feed_state(&self, lease: &FeedLease) -> Result<(), FrogError>;

    /// In one transaction: check the lease and cooldown, sample an eligible
    /// item, increment the user's score, advance `last_granted_at`, and drop
    /// the lease.
    ///
    /// Fails with [`FrogError::CooldownNotElapsed`],
    /// [`FrogError::ItemPoolExhausted`], or [`FrogError::LockContention`]
    /// (lease lost) and leaves the row untouched in every failure case.
    async fn commit_grant(&self, grant: GrantRequest) -> Result<Item, FrogError>;

    // --- Scores ---

    /// A user's score and rank, `None` before the first grant.
    async fn get_score(&self, user_id: &str) -> Result<Option<Score>, FrogError>;

    /// Top scores, highest first, at most `limit` entries.
    async fn scoreboard(&self, limit: usize) -> Result<Vec<Score>, FrogError>;
}

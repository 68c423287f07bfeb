// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the StorageAdapter trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use frogcrypto_config::model::StorageConfig;
use frogcrypto_core::types::{FeedDefinition, Item, Score, UserFeedState};
use frogcrypto_core::{
    AdapterType, FeedLease, FrogError, GrantRequest, HealthStatus, PluginAdapter, StorageAdapter,
};

use crate::database::Database;
use crate::queries;

/// SQLite-backed storage adapter.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is opened on the first call to
/// [`StorageAdapter::initialize`].
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// Create a new SqliteStorage with the given configuration.
    ///
    /// The database connection is not opened until [`StorageAdapter::initialize`] is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    fn db(&self) -> Result<&Database, FrogError> {
        self.db.get().ok_or_else(|| FrogError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, FrogError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl StorageAdapter for SqliteStorage {
    async fn initialize(&self) -> Result<(), FrogError> {
        let db = Database::open(&self.config).await?;
        self.db.set(db).map_err(|_| FrogError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), FrogError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }

    // --- Items ---

    async fn upsert_items(&self, items: &[Item]) -> Result<(), FrogError> {
        queries::items::upsert_items(self.db()?, items).await
    }

    async fn delete_items(&self, ids: &[i64]) -> Result<(), FrogError> {
        queries::items::delete_items(self.db()?, ids).await
    }

    async fn list_items(&self) -> Result<Vec<Item>, FrogError> {
        queries::items::list_items(self.db()?).await
    }

    async fn possible_item_ids(&self) -> Result<Vec<i64>, FrogError> {
        queries::items::possible_item_ids(self.db()?).await
    }

    // --- Feeds ---

    async fn upsert_feeds(&self, feeds: &[FeedDefinition]) -> Result<(), FrogError> {
        queries::feeds::upsert_feeds(self.db()?, feeds).await
    }

    async fn list_feeds(&self) -> Result<Vec<FeedDefinition>, FrogError> {
        queries::feeds::list_feeds(self.db()?).await
    }

    // --- User feed state ---

    async fn init_user_feed_state(&self, user_id: &str, feed_id: &str) -> Result<(), FrogError> {
        queries::user_state::init_user_feed_state(self.db()?, user_id, feed_id).await
    }

    async fn list_user_feed_states(
        &self,
        user_id: &str,
    ) -> Result<Vec<UserFeedState>, FrogError> {
        queries::user_state::list_user_feed_states(self.db()?, user_id).await
    }

    async fn lock_user_feed_state(&self, lease: &FeedLease) -> Result<i64, FrogError> {
        queries::user_state::lock_user_feed_state(self.db()?, lease).await
    }

    async fn release_user_feed_state(&self, lease: &FeedLease) -> Result<(), FrogError> {
        queries::user_state::release_user_feed_state(self.db()?, lease).await
    }

    async fn commit_grant(&self, grant: GrantRequest) -> Result<Item, FrogError> {
        queries::user_state::commit_grant(self.db()?, grant).await
    }

    // --- Scores ---

    async fn get_score(&self, user_id: &str) -> Result<Option<Score>, FrogError> {
        queries::scores::get_score(self.db()?, user_id).await
    }

    async fn scoreboard(&self, limit: usize) -> Result<Vec<Score>, FrogError> {
        queries::scores::scoreboard(self.db()?, limit).await
    }
}

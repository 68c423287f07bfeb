// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles a complete FrogCrypto service over a temp SQLite
//! database, with a manual clock, an admin identity on the allow-list, and a
//! recording error reporter. `second_instance()` opens another service on the
//! same database file to exercise cross-process locking.

use std::sync::Arc;
use std::time::Duration;

use frogcrypto_auth::{
    Ed25519CredentialVerifier, Keypair, SignedRewardIssuer, sign_credential_at_ms,
};
use frogcrypto_config::model::StorageConfig;
use frogcrypto_core::types::{Credential, FeedDefinition, Item};
use frogcrypto_core::{Clock, FrogError, StorageAdapter};
use frogcrypto_engine::{FrogCryptoService, ServiceSettings};
use frogcrypto_storage::SqliteStorage;

use crate::clock::ManualClock;
use crate::fixtures::T0;
use crate::reporter::RecordingReporter;

const CREDENTIAL_MAX_AGE: Duration = Duration::from_secs(300);

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    items: Vec<Item>,
    feeds: Vec<FeedDefinition>,
    start_ms: i64,
    settings: ServiceSettings,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            items: Vec::new(),
            feeds: Vec::new(),
            start_ms: T0,
            settings: ServiceSettings {
                public_base_url: "http://frogs.test".to_string(),
                ..ServiceSettings::default()
            },
        }
    }

    /// Items written to the store before the service starts.
    pub fn with_items(mut self, items: Vec<Item>) -> Self {
        self.items = items;
        self
    }

    /// Feeds written to the store before the service starts.
    pub fn with_feeds(mut self, feeds: Vec<FeedDefinition>) -> Self {
        self.feeds = feeds;
        self
    }

    /// Initial clock time in epoch milliseconds.
    pub fn starting_at(mut self, now_ms: i64) -> Self {
        self.start_ms = now_ms;
        self
    }

    pub fn with_lock_lease(mut self, lease: Duration) -> Self {
        self.settings.lock_lease = lease;
        self
    }

    pub fn with_scoreboard_limit(mut self, limit: usize) -> Self {
        self.settings.scoreboard_limit = limit;
        self
    }

    /// Build the harness: create the database, seed it, and load the feed cache.
    pub async fn build(mut self) -> Result<TestHarness, FrogError> {
        let temp_dir = tempfile::TempDir::new().map_err(FrogError::storage)?;
        let db_path = temp_dir
            .path()
            .join("frogcrypto-test.db")
            .to_string_lossy()
            .into_owned();

        let storage = open_storage(&db_path).await?;
        if !self.items.is_empty() {
            storage.upsert_items(&self.items).await?;
        }
        if !self.feeds.is_empty() {
            storage.upsert_feeds(&self.feeds).await?;
        }

        let admin = Keypair::generate();
        self.settings.admin_identities.insert(admin.public_hex());

        let clock = Arc::new(ManualClock::new(self.start_ms));
        let issuer_key = Keypair::generate().private_bytes();
        let reporter = Arc::new(RecordingReporter::new());
        let service = build_service(
            Arc::clone(&storage),
            Arc::clone(&clock),
            &issuer_key,
            self.settings.clone(),
            Arc::clone(&reporter),
        )
        .await?;

        Ok(TestHarness {
            service,
            storage,
            clock,
            admin,
            reporter,
            settings: self.settings,
            issuer_key,
            db_path,
            _temp_dir: temp_dir,
        })
    }
}

async fn open_storage(db_path: &str) -> Result<Arc<dyn StorageAdapter>, FrogError> {
    let storage = SqliteStorage::new(StorageConfig {
        database_path: db_path.to_string(),
        wal_mode: true,
        busy_timeout_ms: 5_000,
    });
    storage.initialize().await?;
    Ok(Arc::new(storage))
}

async fn build_service(
    storage: Arc<dyn StorageAdapter>,
    clock: Arc<ManualClock>,
    issuer_key: &[u8; 32],
    settings: ServiceSettings,
    reporter: Arc<RecordingReporter>,
) -> Result<Arc<FrogCryptoService>, FrogError> {
    let verifier = Ed25519CredentialVerifier::new(clock.clone(), CREDENTIAL_MAX_AGE);
    let issuer = SignedRewardIssuer::new(Keypair::from_bytes(issuer_key));
    let service = FrogCryptoService::new(
        storage,
        Arc::new(verifier),
        Arc::new(issuer),
        clock,
        settings,
    )
    .with_reporter(reporter);
    service.feeds().refresh().await?;
    Ok(Arc::new(service))
}

/// A complete test environment over a temp database.
pub struct TestHarness {
    /// The service under test.
    pub service: Arc<FrogCryptoService>,
    /// The store the service writes to (temp DB, cleaned up on drop).
    pub storage: Arc<dyn StorageAdapter>,
    /// Shared by every service built from this harness.
    pub clock: Arc<ManualClock>,
    /// Keypair whose identity is on the admin allow-list.
    pub admin: Keypair,
    /// Receives the unexpected errors of `service`.
    pub reporter: Arc<RecordingReporter>,
    pub settings: ServiceSettings,
    issuer_key: [u8; 32],
    db_path: String,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// A fresh, non-admin user identity.
    pub fn user(&self) -> Keypair {
        Keypair::generate()
    }

    /// A credential for `keypair` signed at the current clock time.
    pub fn credential(&self, keypair: &Keypair) -> Credential {
        sign_credential_at_ms(keypair, self.clock.now_ms())
    }

    pub fn admin_credential(&self) -> Credential {
        self.credential(&self.admin)
    }

    /// Hex public key that signs every issued reward.
    pub fn issuer_hex(&self) -> String {
        Keypair::from_bytes(&self.issuer_key).public_hex()
    }

    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// Another service over the same storage handle. It has its own
    /// in-process slots, so overlapping grants meet only at the store lease.
    pub async fn sibling_service(&self) -> Result<Arc<FrogCryptoService>, FrogError> {
        build_service(
            Arc::clone(&self.storage),
            Arc::clone(&self.clock),
            &self.issuer_key,
            self.settings.clone(),
            Arc::clone(&self.reporter),
        )
        .await
    }

    /// Another service with its own connection and instance id over the same
    /// database file, as a second process would have.
    pub async fn second_instance(&self) -> Result<Arc<FrogCryptoService>, FrogError> {
        let storage = open_storage(&self.db_path).await?;
        build_service(
            storage,
            Arc::clone(&self.clock),
            &self.issuer_key,
            self.settings.clone(),
            Arc::clone(&self.reporter),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use frogcrypto_core::types::Biome;

    use super::*;
    use crate::fixtures::{feed, item};

    #[tokio::test]
    async fn builder_seeds_store_and_cache() {
        let harness = TestHarness::builder()
            .with_items(vec![item(1, Biome::Jungle, 1.0)])
            .with_feeds(vec![feed("jungle", &[Biome::Jungle], 60)])
            .build()
            .await
            .unwrap();

        assert_eq!(harness.storage.list_items().await.unwrap().len(), 1);
        assert!(harness.service.feeds().has_feed("jungle"));
        assert_eq!(harness.clock.now_ms(), T0);
    }

    #[tokio::test]
    async fn admin_is_on_allow_list() {
        let harness = TestHarness::builder().build().await.unwrap();
        assert!(
            harness
                .settings
                .admin_identities
                .contains(&harness.admin.public_hex())
        );
    }

    #[tokio::test]
    async fn temp_db_is_unique_per_harness() {
        let h1 = TestHarness::builder()
            .with_items(vec![item(1, Biome::Desert, 1.0)])
            .build()
            .await
            .unwrap();
        let h2 = TestHarness::builder().build().await.unwrap();

        assert_ne!(h1.db_path(), h2.db_path());
        assert_eq!(h1.storage.list_items().await.unwrap().len(), 1);
        assert!(h2.storage.list_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn second_instance_shares_the_database() {
        let harness = TestHarness::builder()
            .with_feeds(vec![feed("swamp", &[Biome::Swamp], 10)])
            .build()
            .await
            .unwrap();
        let other = harness.second_instance().await.unwrap();
        assert!(other.feeds().has_feed("swamp"));
    }
}

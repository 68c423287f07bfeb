// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory snapshot of feed definitions.
//!
//! The snapshot is replaced wholesale through [`ArcSwap`], so readers always
//! see a complete set. Every refresh takes a generation number before it reads
//! the store; a refresh only publishes if no later-started refresh already
//! has, which keeps a slow periodic refresh from overwriting the result of a
//! post-mutation refresh.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use arc_swap::ArcSwap;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use frogcrypto_core::types::FeedDefinition;
use frogcrypto_core::{FrogError, StorageAdapter};

/// One published set of feeds, keyed by id.
#[derive(Debug, Default)]
pub struct FeedSnapshot {
    generation: u64,
    feeds: BTreeMap<String, FeedDefinition>,
}

impl FeedSnapshot {
    pub fn get(&self, feed_id: &str) -> Option<&FeedDefinition> {
        self.feeds.get(feed_id)
    }

    pub fn len(&self) -> usize {
        self.feeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.feeds.is_empty()
    }

    /// Feeds in id order.
    pub fn iter(&self) -> impl Iterator<Item = &FeedDefinition> {
        self.feeds.values()
    }
}

struct RefreshTask {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Process-wide cache of feed definitions.
pub struct FeedCache {
    storage: Arc<dyn StorageAdapter>,
    snapshot: ArcSwap<FeedSnapshot>,
    next_generation: AtomicU64,
    task: Mutex<Option<RefreshTask>>,
}

impl FeedCache {
    /// Create an empty cache. Call [`FeedCache::start`] or
    /// [`FeedCache::refresh`] to populate it.
    pub fn new(storage: Arc<dyn StorageAdapter>) -> Self {
        Self {
            storage,
            snapshot: ArcSwap::from_pointee(FeedSnapshot::default()),
            next_generation: AtomicU64::new(1),
            task: Mutex::new(None),
        }
    }

    /// Re-read all feeds from the store and publish them.
    ///
    /// On error the previous snapshot stays in place.
    pub async fn refresh(&self) -> Result<usize, FrogError> {
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst);
        let feeds = self.storage.list_feeds().await?;
        let count = feeds.len();
        let fresh = Arc::new(FeedSnapshot {
            generation,
            feeds: feeds.into_iter().map(|f| (f.id.clone(), f)).collect(),
        });

        let previous = self.snapshot.rcu(|current| {
            if current.generation > generation {
                Arc::clone(current)
            } else {
                Arc::clone(&fresh)
            }
        });
        if previous.generation > generation {
            debug!(generation, "discarded stale feed refresh");
        } else {
            debug!(generation, count, "feed cache refreshed");
        }
        Ok(count)
    }

    /// Populate the cache and spawn the periodic refresh task.
    ///
    /// The initial load must succeed. Later refresh failures are logged and
    /// leave the previous snapshot in place.
    pub async fn start(
        self: &Arc<Self>,
        interval: Duration,
        cancel: CancellationToken,
    ) -> Result<(), FrogError> {
        let count = self.refresh().await?;
        info!(count, interval_secs = interval.as_secs(), "feed cache started");

        let cache = Arc::clone(self);
        let task_cancel = cancel.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(e) = cache.refresh().await {
                            warn!(error = %e, "periodic feed refresh failed, keeping previous snapshot");
                        }
                    }
                    _ = task_cancel.cancelled() => {
                        debug!("feed refresh task stopping");
                        break;
                    }
                }
            }
        });

        let mut task = self.task.lock().await;
        if let Some(old) = task.replace(RefreshTask { cancel, handle }) {
            old.cancel.cancel();
        }
        Ok(())
    }

    /// Cancel the periodic refresh task and wait for it to finish.
    pub async fn stop(&self) {
        let task = self.task.lock().await.take();
        if let Some(task) = task {
            task.cancel.cancel();
            if let Err(e) = task.handle.await {
                warn!(error = %e, "feed refresh task ended abnormally");
            }
        }
    }

    /// The currently published snapshot.
    pub fn snapshot(&self) -> Arc<FeedSnapshot> {
        self.snapshot.load_full()
    }

    pub fn get(&self, feed_id: &str) -> Option<FeedDefinition> {
        self.snapshot.load().get(feed_id).cloned()
    }

    pub fn has_feed(&self, feed_id: &str) -> bool {
        self.snapshot.load().get(feed_id).is_some()
    }

    /// Feeds in id order. Private feeds are only included when asked for.
    pub fn list(&self, include_private: bool) -> Vec<FeedDefinition> {
        self.snapshot
            .load()
            .iter()
            .filter(|f| include_private || !f.private)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use frogcrypto_config::model::StorageConfig;
    use frogcrypto_core::types::{Biome, CategoryWeight};
    use frogcrypto_storage::SqliteStorage;
    use tempfile::TempDir;

    use super::*;

    async fn storage() -> (Arc<dyn StorageAdapter>, TempDir) {
        let dir = TempDir::new().unwrap();
        let storage = SqliteStorage::new(StorageConfig {
            database_path: dir.path().join("cache.db").to_string_lossy().into_owned(),
            wal_mode: true,
            busy_timeout_ms: 1_000,
        });
        storage.initialize().await.unwrap();
        (Arc::new(storage), dir)
    }

    fn feed(id: &str, private: bool) -> FeedDefinition {
        FeedDefinition {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            private,
            active_until: 4_102_444_800,
            cooldown_secs: 60,
            categories: BTreeMap::from([(Biome::Jungle, CategoryWeight { drop_weight_scaler: 1.0 })]),
        }
    }

    #[tokio::test]
    async fn empty_until_refreshed() {
        let (storage, _dir) = storage().await;
        storage.upsert_feeds(&[feed("a", false)]).await.unwrap();
        let cache = FeedCache::new(storage);

        assert!(!cache.has_feed("a"));
        assert_eq!(cache.refresh().await.unwrap(), 1);
        assert!(cache.has_feed("a"));
    }

    #[tokio::test]
    async fn listing_hides_private_feeds_but_lookup_does_not() {
        let (storage, _dir) = storage().await;
        storage
            .upsert_feeds(&[feed("b", false), feed("secret", true), feed("a", false)])
            .await
            .unwrap();
        let cache = FeedCache::new(storage);
        cache.refresh().await.unwrap();

        let ids: Vec<String> = cache.list(false).into_iter().map(|f| f.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(cache.list(true).len(), 3);
        assert!(cache.get("secret").is_some());
    }

    #[tokio::test]
    async fn snapshot_held_by_reader_is_unchanged_by_refresh() {
        let (storage, _dir) = storage().await;
        storage.upsert_feeds(&[feed("a", false)]).await.unwrap();
        let cache = FeedCache::new(Arc::clone(&storage));
        cache.refresh().await.unwrap();

        let held = cache.snapshot();
        storage.upsert_feeds(&[feed("b", false)]).await.unwrap();
        cache.refresh().await.unwrap();

        assert_eq!(held.len(), 1);
        assert_eq!(cache.snapshot().len(), 2);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_snapshot() {
        let (storage, _dir) = storage().await;
        storage.upsert_feeds(&[feed("a", false)]).await.unwrap();
        let cache = FeedCache::new(storage);
        cache.refresh().await.unwrap();

        let broken: Arc<dyn StorageAdapter> = Arc::new(SqliteStorage::new(StorageConfig {
            database_path: "unused.db".to_string(),
            wal_mode: true,
            busy_timeout_ms: 1_000,
        }));
        let failing = FeedCache {
            storage: broken,
            snapshot: ArcSwap::new(cache.snapshot()),
            next_generation: AtomicU64::new(10),
            task: Mutex::new(None),
        };
        assert!(failing.refresh().await.is_err());
        assert!(failing.has_feed("a"));
    }

    #[tokio::test]
    async fn start_and_stop_periodic_refresh() {
        let (storage, _dir) = storage().await;
        let cache = Arc::new(FeedCache::new(Arc::clone(&storage)));
        let cancel = CancellationToken::new();
        cache
            .start(Duration::from_millis(20), cancel.clone())
            .await
            .unwrap();
        assert!(cache.snapshot().is_empty());

        storage.upsert_feeds(&[feed("late", false)]).await.unwrap();
        tokio::time::timeout(Duration::from_secs(5), async {
            while !cache.has_feed("late") {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("periodic refresh should pick up the new feed");

        cache.stop().await;
        assert!(cancel.is_cancelled());
    }
}

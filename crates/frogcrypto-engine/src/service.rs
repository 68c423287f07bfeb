// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The FrogCrypto service: owns the collaborators and the feed cache and
//! exposes the read paths. Polling lives in [`crate::reservation`] and admin
//! mutations in [`crate::admin`].

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use frogcrypto_config::model::FeedServiceConfig;
use frogcrypto_core::types::{
    ComputedUserFeedState, Credential, FeedDefinition, Score, UserId, UserState,
};
use frogcrypto_core::{
    Clock, CredentialVerifier, ErrorReporter, FrogError, LogErrorReporter, RewardIssuer,
    StorageAdapter,
};

use crate::feed_cache::FeedCache;
use crate::in_flight::InFlight;

/// Runtime knobs of the service, derived from `[frogcrypto]` config.
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub public_base_url: String,
    /// Lowercase hex identities allowed to mutate items and feeds.
    pub admin_identities: HashSet<String>,
    pub lock_lease: Duration,
    pub scoreboard_limit: usize,
    pub feed_refresh_interval: Duration,
}

impl ServiceSettings {
    pub fn from_config(config: &FeedServiceConfig) -> Self {
        Self {
            public_base_url: config.public_base_url.clone(),
            admin_identities: config
                .admin_identities
                .iter()
                .map(|id| id.to_ascii_lowercase())
                .collect(),
            lock_lease: Duration::from_secs(config.lock_lease_secs),
            scoreboard_limit: config.scoreboard_limit as usize,
            feed_refresh_interval: Duration::from_secs(config.feed_refresh_interval_secs),
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self::from_config(&FeedServiceConfig::default())
    }
}

/// Feed polling, user state, scoreboard, and admin operations over one store.
pub struct FrogCryptoService {
    pub(crate) storage: Arc<dyn StorageAdapter>,
    pub(crate) verifier: Arc<dyn CredentialVerifier>,
    pub(crate) issuer: Arc<dyn RewardIssuer>,
    pub(crate) reporter: Arc<dyn ErrorReporter>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) feeds: Arc<FeedCache>,
    pub(crate) in_flight: InFlight,
    pub(crate) settings: ServiceSettings,
    /// Prefix of every lease holder token issued by this instance.
    pub(crate) instance_id: String,
}

impl FrogCryptoService {
    pub fn new(
        storage: Arc<dyn StorageAdapter>,
        verifier: Arc<dyn CredentialVerifier>,
        issuer: Arc<dyn RewardIssuer>,
        clock: Arc<dyn Clock>,
        settings: ServiceSettings,
    ) -> Self {
        let feeds = Arc::new(FeedCache::new(Arc::clone(&storage)));
        Self {
            storage,
            verifier,
            issuer,
            reporter: Arc::new(LogErrorReporter),
            clock,
            feeds,
            in_flight: InFlight::new(),
            settings,
            instance_id: uuid::Uuid::new_v4().to_string(),
        }
    }

    /// Replace the operational error channel.
    pub fn with_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Load the feed cache and start its periodic refresh.
    pub async fn start(&self, cancel: &CancellationToken) -> Result<(), FrogError> {
        self.feeds
            .start(self.settings.feed_refresh_interval, cancel.child_token())
            .await?;
        info!(instance = %self.instance_id, "frogcrypto service started");
        Ok(())
    }

    pub async fn stop(&self) {
        self.feeds.stop().await;
        info!(instance = %self.instance_id, "frogcrypto service stopped");
    }

    pub fn feeds(&self) -> &Arc<FeedCache> {
        &self.feeds
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    pub fn storage(&self) -> &Arc<dyn StorageAdapter> {
        &self.storage
    }

    /// Public feeds in id order.
    pub fn list_feeds(&self) -> Vec<FeedDefinition> {
        self.feeds.list(false)
    }

    /// The feed with `feed_id`, private or not, as a list of zero or one.
    pub fn list_single_feed(&self, feed_id: &str) -> Vec<FeedDefinition> {
        self.feeds.get(feed_id).into_iter().collect()
    }

    /// Per-feed progress, collectible item ids, and score of the caller.
    pub async fn get_user_state(
        &self,
        credential: Option<&Credential>,
    ) -> Result<UserState, FrogError> {
        let result = self.user_state_inner(credential).await;
        self.observe("get user state", result)
    }

    async fn user_state_inner(
        &self,
        credential: Option<&Credential>,
    ) -> Result<UserState, FrogError> {
        let user = self.authenticate(credential).await?;
        let states = self.storage.list_user_feed_states(user.as_str()).await?;
        let snapshot = self.feeds.snapshot();
        let now = self.clock.now_ms();
        let feeds = states
            .iter()
            .filter_map(|state| {
                snapshot
                    .get(&state.feed_id)
                    .map(|feed| ComputedUserFeedState::compute(state, feed, now))
            })
            .collect();

        Ok(UserState {
            feeds,
            possible_item_ids: self.storage.possible_item_ids().await?,
            score: self.storage.get_score(user.as_str()).await?,
        })
    }

    /// Top scores, bounded by the configured limit.
    pub async fn scoreboard(&self) -> Result<Vec<Score>, FrogError> {
        let result = self.storage.scoreboard(self.settings.scoreboard_limit).await;
        self.observe("scoreboard", result)
    }

    pub(crate) async fn authenticate(
        &self,
        credential: Option<&Credential>,
    ) -> Result<UserId, FrogError> {
        let credential = credential
            .ok_or_else(|| FrogError::Authentication("missing credential".to_string()))?;
        self.verifier.verify(credential).await
    }

    /// Route unexpected failures to the reporter; expected ones only to debug.
    pub(crate) fn observe<T>(
        &self,
        operation: &str,
        result: Result<T, FrogError>,
    ) -> Result<T, FrogError> {
        if let Err(e) = &result {
            if e.is_expected() {
                debug!(operation, error = %e, "request rejected");
            } else {
                self.reporter.report(operation, e);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_lowercase_admin_identities() {
        let config = FeedServiceConfig {
            admin_identities: vec!["AB".repeat(32)],
            scoreboard_limit: 7,
            lock_lease_secs: 3,
            ..FeedServiceConfig::default()
        };
        let settings = ServiceSettings::from_config(&config);
        assert!(settings.admin_identities.contains(&"ab".repeat(32)));
        assert_eq!(settings.scoreboard_limit, 7);
        assert_eq!(settings.lock_lease, Duration::from_secs(3));
    }

    #[test]
    fn default_settings_follow_config_defaults() {
        let settings = ServiceSettings::default();
        assert_eq!(settings.public_base_url, "http://localhost:3100");
        assert_eq!(settings.feed_refresh_interval, Duration::from_secs(30));
        assert!(settings.admin_identities.is_empty());
    }
}

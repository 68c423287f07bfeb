// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The grant path of a feed poll.
//!
//! A poll takes the in-process slot for its (user, feed) pair, then the
//! durable lease on the state row, then commits the grant in one store
//! transaction. Any attempt that finds either lock taken fails immediately
//! with [`FrogError::LockContention`].

use std::time::Duration;

use tracing::{info, warn};

use frogcrypto_core::types::{Credential, FeedDefinition, IssuedReward, UserId};
use frogcrypto_core::{FeedLease, FrogError, GrantRequest};

use crate::service::FrogCryptoService;
use crate::synthesis::synthesize_reward;

impl FrogCryptoService {
    /// Grant one reward from `feed_id` to the credential's owner.
    pub async fn poll_feed(
        &self,
        feed_id: &str,
        credential: Option<&Credential>,
    ) -> Result<IssuedReward, FrogError> {
        let result = self.poll_inner(feed_id, credential).await;
        self.observe("poll feed", result)
    }

    async fn poll_inner(
        &self,
        feed_id: &str,
        credential: Option<&Credential>,
    ) -> Result<IssuedReward, FrogError> {
        let user = self.authenticate(credential).await?;
        let feed = self
            .feeds
            .get(feed_id)
            .ok_or_else(|| FrogError::FeedNotFound {
                feed_id: feed_id.to_string(),
            })?;
        if !feed.is_active_at(self.clock.now_ms()) {
            return Err(FrogError::FeedInactive {
                feed_id: feed.id.clone(),
            });
        }

        self.storage
            .init_user_feed_state(user.as_str(), &feed.id)
            .await?;

        let _slot = self
            .in_flight
            .try_acquire(user.as_str(), &feed.id)
            .ok_or_else(|| FrogError::LockContention {
                feed_id: feed.id.clone(),
            })?;
        let holder = format!("{}:{}", self.instance_id, uuid::Uuid::new_v4());

        let now = self.clock.now_ms();
        let lease = FeedLease {
            user_id: user.to_string(),
            feed_id: feed.id.clone(),
            holder,
            acquired_at: now,
            expires_at: lease_expiry(now, self.settings.lock_lease),
        };
        let last_granted_at = self.storage.lock_user_feed_state(&lease).await?;

        let next_eligible_at = feed.next_eligible_at(last_granted_at);
        if now < next_eligible_at {
            self.release(&lease).await;
            return Err(FrogError::CooldownNotElapsed { next_eligible_at });
        }

        let grant = grant_request(&feed, lease.clone(), now);
        let item = match self.storage.commit_grant(grant).await {
            Ok(item) => item,
            Err(e) => {
                self.release(&lease).await;
                return Err(e);
            }
        };

        let reward = {
            let mut rng = rand::thread_rng();
            synthesize_reward(
                &item,
                &user,
                &self.settings.public_base_url,
                self.clock.now_ms(),
                &mut rng,
            )?
        };
        info!(
            user = %short(&user),
            feed = %feed.id,
            item = item.id,
            "reward granted"
        );
        self.issuer.issue(reward, &user).await
    }

    /// Best-effort lease release on a failed attempt.
    async fn release(&self, lease: &FeedLease) {
        if let Err(e) = self.storage.release_user_feed_state(lease).await {
            warn!(
                feed = %lease.feed_id,
                error = %e,
                "failed to release feed lease, it will expire"
            );
        }
    }
}

fn grant_request(feed: &FeedDefinition, lease: FeedLease, granted_at: i64) -> GrantRequest {
    GrantRequest {
        lease,
        granted_at,
        cooldown_ms: feed.cooldown_ms(),
        category_scalers: feed.category_scalers(),
    }
}

/// Lease deadline `lease` after `now`, saturating instead of wrapping.
fn lease_expiry(now: i64, lease: Duration) -> i64 {
    now.saturating_add(i64::try_from(lease.as_millis()).unwrap_or(i64::MAX))
}

fn short(user: &UserId) -> &str {
    let id = user.as_str();
    id.get(..12).unwrap_or(id)
}

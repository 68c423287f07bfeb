// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the FrogCrypto feed service.

use thiserror::Error;

/// The primary error type used across all FrogCrypto adapter traits and core operations.
///
/// Variants fall into four groups: caller identity problems (authentication,
/// authorization, bad requests), reservation state-machine outcomes (inactive
/// feed, cooldown, lock contention, empty item pool), and unexpected
/// persistence or integrity failures. Use [`FrogError::is_expected`] to tell
/// them apart.
#[derive(Debug, Error)]
pub enum FrogError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Missing, malformed, expired, or forged credential.
    #[error("invalid credential: {0}")]
    Authentication(String),

    /// Valid credential without the privilege the operation requires.
    #[error("not authorized: {0}")]
    Forbidden(String),

    /// Request payload rejected before any store mutation.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// No feed with the given id is known to the feed cache.
    #[error("feed not found: {feed_id}")]
    FeedNotFound { feed_id: String },

    /// The feed's active window has elapsed.
    #[error("feed is not active: {feed_id}")]
    FeedInactive { feed_id: String },

    /// Another grant for the same (user, feed) pair is in flight.
    #[error("there is another request in flight for feed {feed_id}, try again shortly")]
    LockContention { feed_id: String },

    /// The cooldown window since the last grant has not elapsed yet.
    #[error("next fetch available at {next_eligible_at}")]
    CooldownNotElapsed {
        /// Epoch milliseconds at which the next grant becomes possible.
        next_eligible_at: i64,
    },

    /// No eligible item could be sampled for the feed.
    #[error("no item available for feed {feed_id}")]
    ItemPoolExhausted { feed_id: String },

    /// Storage backend errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Stored data that cannot be mapped to the public model.
    #[error("data integrity error: {0}")]
    DataIntegrity(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl FrogError {
    /// Wrap any storage-layer error.
    pub fn storage<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        FrogError::Storage {
            source: Box::new(source),
        }
    }

    /// Returns `true` for conditions that are part of normal operation.
    ///
    /// Expected errors are surfaced to the caller with enough detail to decide
    /// when to retry and are never reported as operational failures.
    pub fn is_expected(&self) -> bool {
        !matches!(
            self,
            FrogError::Storage { .. }
                | FrogError::DataIntegrity(_)
                | FrogError::Config(_)
                | FrogError::Internal(_)
        )
    }
}

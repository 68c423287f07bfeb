// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reservation engine for the FrogCrypto feed service.
//!
//! [`FrogCryptoService`] ties a [`StorageAdapter`](frogcrypto_core::StorageAdapter),
//! a credential verifier, and a reward issuer together with the in-memory
//! [`FeedCache`]. A poll verifies the caller, resolves the feed, takes the
//! (user, feed) lock without waiting, and commits the grant atomically before
//! synthesizing and issuing the reward.

pub mod admin;
pub mod feed_cache;
pub mod in_flight;
pub mod reservation;
pub mod service;
pub mod synthesis;

pub use admin::{validate_feeds, validate_items};
pub use feed_cache::{FeedCache, FeedSnapshot};
pub use in_flight::{InFlight, InFlightGuard};
pub use service::{FrogCryptoService, ServiceSettings};
pub use synthesis::{image_url, synthesize_reward};

// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions for the FrogCrypto service.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod auth;
pub mod issuer;
pub mod reporter;
pub mod storage;

// Re-export all traits at the traits module level for convenience.
pub use adapter::PluginAdapter;
pub use auth::CredentialVerifier;
pub use issuer::RewardIssuer;
pub use reporter::{ErrorReporter, LogErrorReporter};
pub use storage::{FeedLease, GrantRequest, StorageAdapter};

// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the FrogCrypto feed service.
//!
//! This crate provides the trait definitions, error types, domain types, and
//! weighted sampling used throughout the FrogCrypto workspace. Storage,
//! credential verification, and reward issuance backends implement the traits
//! defined here.

pub mod clock;
pub mod error;
pub mod sampling;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use clock::{Clock, SystemClock};
pub use error::FrogError;
pub use types::{AdapterType, HealthStatus, UserId};

// Re-export all adapter traits at crate root.
pub use traits::{
    CredentialVerifier, ErrorReporter, FeedLease, GrantRequest, LogErrorReporter, PluginAdapter,
    RewardIssuer, StorageAdapter,
};

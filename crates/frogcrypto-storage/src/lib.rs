// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the FrogCrypto feed service.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, a single
//! connection serialized through `tokio-rusqlite`, and typed operations for
//! items, feeds, per-user feed state leases, and scores.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod queries;

pub use adapter::SqliteStorage;
pub use database::Database;

// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query modules for items, feeds, per-user feed state, and scores.

pub mod feeds;
pub mod items;
pub mod scores;
pub mod user_state;

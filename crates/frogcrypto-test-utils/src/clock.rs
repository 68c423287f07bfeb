// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A clock for tests that controls the passage of time explicitly.

use std::sync::atomic::{AtomicI64, Ordering};

use frogcrypto_core::Clock;

/// Clock frozen at a given epoch-millisecond time until moved.
#[derive(Debug)]
pub struct ManualClock {
    now_ms: AtomicI64,
}

impl ManualClock {
    pub fn new(now_ms: i64) -> Self {
        Self {
            now_ms: AtomicI64::new(now_ms),
        }
    }

    pub fn set(&self, now_ms: i64) {
        self.now_ms.store(now_ms, Ordering::SeqCst);
    }

    /// Move forward by `ms` milliseconds.
    pub fn advance(&self, ms: i64) {
        self.now_ms.fetch_add(ms, Ordering::SeqCst);
    }

    pub fn advance_secs(&self, secs: i64) {
        self.advance(secs * 1000);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}

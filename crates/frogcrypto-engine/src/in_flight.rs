// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-(user, feed) try-lock for grants running in this process.
//!
//! Rejects a second same-key attempt before it reaches the store. The
//! durable lease in the store remains the lock that holds across processes.

use std::sync::Arc;

use dashmap::DashSet;

type Key = (String, String);

/// Set of (user, feed) pairs with a grant in flight.
#[derive(Default, Clone)]
pub struct InFlight {
    keys: Arc<DashSet<Key>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the pair as busy, or return `None` if it already is.
    ///
    /// The pair is released when the returned guard drops.
    pub fn try_acquire(&self, user_id: &str, feed_id: &str) -> Option<InFlightGuard> {
        let key = (user_id.to_string(), feed_id.to_string());
        self.keys.insert(key.clone()).then(|| InFlightGuard {
            keys: Arc::clone(&self.keys),
            key,
        })
    }

    /// Number of grants currently in flight.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Releases its (user, feed) pair on drop.
pub struct InFlightGuard {
    keys: Arc<DashSet<Key>>,
    key: Key,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.keys.remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_fails_until_guard_drops() {
        let in_flight = InFlight::new();
        let guard = in_flight.try_acquire("alice", "jungle").unwrap();
        assert!(in_flight.try_acquire("alice", "jungle").is_none());
        assert_eq!(in_flight.len(), 1);

        drop(guard);
        assert!(in_flight.is_empty());
        assert!(in_flight.try_acquire("alice", "jungle").is_some());
    }

    #[test]
    fn different_pairs_do_not_conflict() {
        let in_flight = InFlight::new();
        let _a = in_flight.try_acquire("alice", "jungle").unwrap();
        let _b = in_flight.try_acquire("alice", "desert").unwrap();
        let _c = in_flight.try_acquire("bob", "jungle").unwrap();
        assert_eq!(in_flight.len(), 3);
    }

    #[test]
    fn clones_share_state() {
        let in_flight = InFlight::new();
        let other = in_flight.clone();
        let _guard = in_flight.try_acquire("alice", "jungle").unwrap();
        assert!(other.try_acquire("alice", "jungle").is_none());
    }

    #[test]
    fn concurrent_acquires_admit_exactly_one() {
        let in_flight = InFlight::new();
        let barrier = Arc::new(std::sync::Barrier::new(16));
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let in_flight = in_flight.clone();
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    // Hold the guard until every thread has tried.
                    let guard = in_flight.try_acquire("alice", "jungle");
                    let won = guard.is_some();
                    barrier.wait();
                    won
                })
            })
            .collect();
        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(winners, 1);
    }
}

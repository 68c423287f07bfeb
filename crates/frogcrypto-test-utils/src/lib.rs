// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for FrogCrypto integration tests.
//!
//! Provides a manually driven clock, item and feed fixtures, and a harness
//! that wires a complete service over a temp SQLite database.
//!
//! # Components
//!
//! - [`ManualClock`] - Clock that only moves when told to
//! - [`RecordingReporter`] - Error reporter that captures what it receives
//! - [`TestHarness`] - Service, store, and keys for one test

pub mod clock;
pub mod fixtures;
pub mod harness;
pub mod reporter;

pub use clock::ManualClock;
pub use fixtures::{FAR_FUTURE_SECS, T0, feed, item};
pub use harness::{TestHarness, TestHarnessBuilder};
pub use reporter::RecordingReporter;

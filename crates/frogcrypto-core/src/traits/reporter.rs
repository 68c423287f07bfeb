// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Operational error channel.

use crate::error::FrogError;

/// Receives unexpected failures (persistence, integrity, internal bugs).
///
/// Expected state-machine errors are never passed here.
pub trait ErrorReporter: Send + Sync + 'static {
    fn report(&self, context: &str, error: &FrogError);
}

/// Reports errors through `tracing` at error level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogErrorReporter;

impl ErrorReporter for LogErrorReporter {
    fn report(&self, context: &str, error: &FrogError) {
        tracing::error!(context, error = %error, "unexpected error");
    }
}

// SPDX-FileCopyrightText: 2026 FrogCrypto Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error reporter that records every report for later assertions.

use std::sync::Mutex;

use frogcrypto_core::{ErrorReporter, FrogError};

/// Captures `(context, message)` pairs passed to [`ErrorReporter::report`].
#[derive(Debug, Default)]
pub struct RecordingReporter {
    reports: Mutex<Vec<(String, String)>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<(String, String)> {
        self.reports
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn count(&self) -> usize {
        self.reports().len()
    }
}

impl ErrorReporter for RecordingReporter {
    fn report(&self, context: &str, error: &FrogError) {
        self.reports
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((context.to_string(), error.to_string()));
    }
}

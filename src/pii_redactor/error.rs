// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Error types for the PII redactor

use std::time::Duration;
use thiserror::Error;

/// Errors raised while constructing a [`Redactor`](super::Redactor)
#[derive(Debug, Error)]
pub enum RedactError {
    #[error("invalid custom pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to compile rule set: {0}")]
    RuleSet(#[source] regex::Error),

    #[error("failed to build reporter HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("failed to start reporter: {0}")]
    ReporterStartup(#[from] std::io::Error),
}

/// Failures of a background event report
///
/// These never reach the caller of `redact`; they are logged and, when
/// `fail_silent` is off, passed to the registered error callback.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("event report timed out after {0:?}")]
    Timeout(Duration),

    #[error("event report failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("dashboard API returned {0}")]
    Status(reqwest::StatusCode),
}

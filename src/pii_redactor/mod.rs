// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// PII Redactor
//
// - Built-in catalog of regex detectors compiled once per process
// - Per-instance ordered rule set (built-ins, then custom patterns)
// - Sequential rule application with one event per replaced match
// - Deep-copy redaction of serde_json values
// - Optional fire-and-forget event reporting on a background worker

pub mod config;
pub mod error;
pub mod patterns;
pub mod redactor;
pub mod replacement;
pub mod reporter;
pub mod walker;

pub use config::{BuiltinRule, Category, RedactorConfig};
pub use error::{RedactError, ReportError};
pub use redactor::{Redaction, Redactor, RedactorBuilder};
pub use replacement::{RedactionAction, RedactionEvent, Replacement};
pub use walker::StructureRedaction;

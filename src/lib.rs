// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Rule-based PII redaction for free text and JSON-shaped data
// Optional Python bindings built with PyO3

//! Detect and replace personally identifiable information.
//!
//! # Examples
//!
//! ```
//! use redactpii::{BuiltinRule, Redactor, RedactorConfig};
//! use serde_json::json;
//!
//! let config = RedactorConfig::only(&[BuiltinRule::Email]).with_custom_rule(r"\b\d{5}\b");
//! let redactor = Redactor::new(config).unwrap();
//!
//! assert_eq!(
//!     redactor.redact("Email: test@example.com, Code: 12345"),
//!     "Email: EMAIL_ADDRESS, Code: DIGITS"
//! );
//!
//! let user = json!({"email": "john@example.com", "age": 42});
//! assert_eq!(
//!     redactor.redact_structure(&user),
//!     json!({"email": "EMAIL_ADDRESS", "age": 42})
//! );
//! ```

pub mod pii_redactor;

#[cfg(feature = "python")]
pub mod python;

pub use pii_redactor::{
    BuiltinRule, Category, RedactError, Redaction, RedactionAction, RedactionEvent, Redactor,
    RedactorBuilder, RedactorConfig, ReportError, Replacement, StructureRedaction,
};

// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Configuration types for the PII redactor

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Default endpoint for the redaction event dashboard
pub const DEFAULT_API_URL: &str = "https://api.redactpii.com/v1/events";

/// Built-in detectors, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuiltinRule {
    CreditCard,
    Email,
    Name,
    Phone,
    Ssn,
}

impl BuiltinRule {
    pub const ALL: [BuiltinRule; 5] = [
        BuiltinRule::CreditCard,
        BuiltinRule::Email,
        BuiltinRule::Name,
        BuiltinRule::Phone,
        BuiltinRule::Ssn,
    ];

    /// Identifier used in the `rules` configuration map
    pub fn as_str(&self) -> &'static str {
        match self {
            BuiltinRule::CreditCard => "CREDIT_CARD",
            BuiltinRule::Email => "EMAIL",
            BuiltinRule::Name => "NAME",
            BuiltinRule::Phone => "PHONE",
            BuiltinRule::Ssn => "SSN",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rule| rule.as_str() == name)
    }
}

/// PII kind attached to every rule and every redaction event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    CreditCardNumber,
    EmailAddress,
    PersonName,
    PhoneNumber,
    UsSocialSecurityNumber,
    /// Fallback for custom rules
    Digits,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::CreditCardNumber => "CREDIT_CARD_NUMBER",
            Category::EmailAddress => "EMAIL_ADDRESS",
            Category::PersonName => "PERSON_NAME",
            Category::PhoneNumber => "PHONE_NUMBER",
            Category::UsSocialSecurityNumber => "US_SOCIAL_SECURITY_NUMBER",
            Category::Digits => "DIGITS",
        }
    }

    /// Token substituted for a match when no global replacement is set
    pub fn placeholder(&self) -> &'static str {
        self.as_str()
    }
}

/// Configuration for a [`Redactor`](super::Redactor)
///
/// Every field is optional when deserializing; missing fields take the
/// defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedactorConfig {
    /// Built-in identifier -> enabled. `None` enables every built-in; a map
    /// enables only the identifiers set to `true`.
    pub rules: Option<HashMap<String, bool>>,
    /// Custom regex sources, applied after the built-ins in this order
    pub custom_rules: Vec<String>,
    /// Replace every match with this string instead of a category placeholder
    pub global_replace_with: Option<String>,

    // Event reporter
    pub api_key: Option<String>,
    pub api_url: String,
    pub fail_silent: bool,
    /// Request timeout in milliseconds
    pub hook_timeout: u64,
    /// Batches waiting for the reporter beyond this count are dropped
    pub report_queue_capacity: usize,
}

impl Default for RedactorConfig {
    fn default() -> Self {
        Self {
            rules: None,
            custom_rules: Vec::new(),
            global_replace_with: None,

            api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            fail_silent: true,
            hook_timeout: 500,
            report_queue_capacity: 64,
        }
    }
}

impl RedactorConfig {
    /// Config with only the given built-ins enabled
    pub fn only(rules: &[BuiltinRule]) -> Self {
        Self {
            rules: Some(
                rules
                    .iter()
                    .map(|rule| (rule.as_str().to_string(), true))
                    .collect(),
            ),
            ..Default::default()
        }
    }

    /// Set a built-in on or off, materializing the "all enabled" default first
    pub fn with_rule(mut self, rule: BuiltinRule, enabled: bool) -> Self {
        let rules = self.rules.get_or_insert_with(|| {
            BuiltinRule::ALL
                .iter()
                .map(|rule| (rule.as_str().to_string(), true))
                .collect()
        });
        rules.insert(rule.as_str().to_string(), enabled);
        self
    }

    pub fn with_custom_rule(mut self, pattern: impl Into<String>) -> Self {
        self.custom_rules.push(pattern.into());
        self
    }

    pub fn with_global_replacement(mut self, replacement: impl Into<String>) -> Self {
        self.global_replace_with = Some(replacement.into());
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn is_enabled(&self, rule: BuiltinRule) -> bool {
        match &self.rules {
            None => true,
            Some(rules) => rules.get(rule.as_str()).copied().unwrap_or(false),
        }
    }

    /// Reporting is on only with a non-empty API key
    pub fn reporting_enabled(&self) -> bool {
        self.api_key.as_deref().is_some_and(|key| !key.is_empty())
    }

    pub fn hook_timeout(&self) -> Duration {
        Duration::from_millis(self.hook_timeout)
    }
}

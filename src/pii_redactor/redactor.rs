// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Redaction engine

use std::sync::Arc;
use tracing::trace;

use super::config::RedactorConfig;
use super::error::{RedactError, ReportError};
use super::patterns::{build_rule_set, RuleSet};
use super::replacement::{redact_text, RedactionEvent, Replacement};
use super::reporter::{ReportErrorHook, Reporter, ReporterSettings};

/// Redacted text together with the events it produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redaction {
    pub text: String,
    pub events: Vec<RedactionEvent>,
}

/// Rule-based PII redactor
///
/// The rule set is built once at construction and never changes, so a
/// single instance can be shared across threads.
///
/// # Example
/// ```
/// use redactpii::{BuiltinRule, Redactor, RedactorConfig};
///
/// let redactor = Redactor::new(RedactorConfig::only(&[BuiltinRule::Email])).unwrap();
/// assert_eq!(redactor.redact("mail test@example.com"), "mail EMAIL_ADDRESS");
/// assert!(!redactor.has_pii("nothing to see"));
/// ```
pub struct Redactor {
    rules: RuleSet,
    replacement: Replacement,
    reporter: Option<Reporter>,
}

impl Redactor {
    pub fn new(config: RedactorConfig) -> Result<Self, RedactError> {
        Self::builder(config).build()
    }

    pub fn builder(config: RedactorConfig) -> RedactorBuilder {
        RedactorBuilder {
            config,
            on_report_error: None,
            sdk_language: "rust".to_string(),
        }
    }

    /// Redact `text`, reporting any events in the background
    pub fn redact(&self, text: &str) -> String {
        self.redact_with_events(text).text
    }

    /// Redact `text` and also return the events produced
    pub fn redact_with_events(&self, text: &str) -> Redaction {
        let mut events = Vec::new();
        let text = self.redact_into(text, &mut events).into_owned();
        self.report(&events);
        Redaction { text, events }
    }

    /// True if any rule matches anywhere in `text`
    pub fn has_pii(&self, text: &str) -> bool {
        self.rules.is_match(text)
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Stop the reporter, waiting for queued events to be sent
    pub fn shutdown(mut self) {
        if let Some(reporter) = self.reporter.take() {
            reporter.shutdown();
        }
    }

    /// Redact without reporting, appending events to `events`
    pub(crate) fn redact_into<'a>(
        &self,
        text: &'a str,
        events: &mut Vec<RedactionEvent>,
    ) -> std::borrow::Cow<'a, str> {
        let before = events.len();
        let redacted = redact_text(text, &self.rules, &self.replacement, events);
        trace!(redactions = events.len() - before, "redacted text");
        redacted
    }

    /// Hand a batch to the reporter, if one is configured
    pub(crate) fn report(&self, events: &[RedactionEvent]) {
        if let Some(reporter) = &self.reporter {
            reporter.report(events.to_vec());
        }
    }
}

/// Builder for a [`Redactor`] with reporter hooks
pub struct RedactorBuilder {
    config: RedactorConfig,
    on_report_error: Option<ReportErrorHook>,
    sdk_language: String,
}

impl RedactorBuilder {
    /// Called for every failed report when `fail_silent` is off
    pub fn on_report_error<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ReportError) + Send + Sync + 'static,
    {
        self.on_report_error = Some(Arc::new(hook));
        self
    }

    /// Language reported as `sdk_language`
    pub fn sdk_language(mut self, language: impl Into<String>) -> Self {
        self.sdk_language = language.into();
        self
    }

    pub fn build(self) -> Result<Redactor, RedactError> {
        let config = self.config;
        let rules = build_rule_set(&config)?;
        let replacement = Replacement::from_global(config.global_replace_with.as_deref());

        let reporter = if config.reporting_enabled() {
            Some(Reporter::start(ReporterSettings {
                api_url: config.api_url.clone(),
                api_key: config.api_key.clone().unwrap_or_default(),
                timeout: config.hook_timeout(),
                fail_silent: config.fail_silent,
                sdk_language: self.sdk_language,
                queue_capacity: config.report_queue_capacity,
                on_error: self.on_report_error,
            })?)
        } else {
            None
        };

        Ok(Redactor {
            rules,
            replacement,
            reporter,
        })
    }
}

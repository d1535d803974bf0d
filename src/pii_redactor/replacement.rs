// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Replacement policy and rule application

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use super::config::Category;
use super::patterns::{Rule, RuleSet};

/// What a match is replaced with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replacement {
    /// Per-category uppercase token, e.g. `EMAIL_ADDRESS`
    Placeholder,
    /// The same string for every category
    Global(String),
}

impl Replacement {
    pub fn from_global(global: Option<&str>) -> Self {
        match global {
            Some(text) => Replacement::Global(text.to_string()),
            None => Replacement::Placeholder,
        }
    }

    pub fn for_category(&self, category: Category) -> &str {
        match self {
            Replacement::Placeholder => category.placeholder(),
            Replacement::Global(text) => text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RedactionAction {
    Redacted,
}

/// One replaced match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionEvent {
    pub pii_type: Category,
    pub action: RedactionAction,
}

impl RedactionEvent {
    pub fn redacted(pii_type: Category) -> Self {
        Self {
            pii_type,
            action: RedactionAction::Redacted,
        }
    }
}

/// Apply every rule in order, each over the previous rule's output
///
/// One event per replaced match is appended to `events`. Text no rule
/// touches is returned borrowed.
pub fn redact_text<'a>(
    text: &'a str,
    rules: &RuleSet,
    replacement: &Replacement,
    events: &mut Vec<RedactionEvent>,
) -> Cow<'a, str> {
    rules.iter().fold(Cow::Borrowed(text), |current, rule| {
        match replace_matches(&current, rule, replacement, events) {
            Some(next) => Cow::Owned(next),
            None => current,
        }
    })
}

/// Replace all non-overlapping matches of one rule, or `None` if it found nothing
fn replace_matches(
    text: &str,
    rule: &Rule,
    replacement: &Replacement,
    events: &mut Vec<RedactionEvent>,
) -> Option<String> {
    let mut matches = rule.regex().find_iter(text).peekable();
    matches.peek()?;

    let token = replacement.for_category(rule.category());
    let mut result = String::with_capacity(text.len());
    let mut last = 0;
    for mat in matches {
        result.push_str(&text[last..mat.start()]);
        result.push_str(token);
        events.push(RedactionEvent::redacted(rule.category()));
        last = mat.end();
    }
    result.push_str(&text[last..]);

    Some(result)
}

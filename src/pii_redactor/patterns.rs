// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Built-in pattern catalog and rule set construction

use once_cell::sync::Lazy;
use regex::{Regex, RegexSet};
use tracing::debug;

use super::config::{BuiltinRule, Category, RedactorConfig};
use super::error::RedactError;

/// Built-in detector, compiled once per process
#[derive(Debug)]
pub struct CatalogEntry {
    pub rule: BuiltinRule,
    pub category: Category,
    pub regex: Regex,
}

/// Pattern definitions (rule, pattern, category)
type PatternDef = (BuiltinRule, &'static str, Category);

const PATTERN_DEFS: [PatternDef; 5] = [
    (
        BuiltinRule::CreditCard,
        r"\d{4}[ -]?\d{4}[ -]?\d{4}[ -]?\d{4}|\d{4}[ -]?\d{6}[ -]?\d{4}\d?",
        Category::CreditCardNumber,
    ),
    (
        BuiltinRule::Email,
        r"(?i)([a-z0-9_\-.+]+)@\w+(\.\w+)*",
        Category::EmailAddress,
    ),
    (
        // Salutation is case-insensitive, the name words are not
        BuiltinRule::Name,
        r"(?:^|\.\s+)(?i:dear|hi|hello|greetings|hey|hey there)\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)+)",
        Category::PersonName,
    ),
    (
        BuiltinRule::Phone,
        r"(\(?\+?[0-9]{1,2}\)?[-. ]?)?(\(?[0-9]{3}\)?[-. ]?[0-9]{3,4}[-. ]?[0-9]{4}|[0-9]{3}[-. ]?[0-9]{4}|[0-9]{4}[-. ]?[0-9]{4}|\b[A-Z0-9]{7}\b)",
        Category::PhoneNumber,
    ),
    (
        BuiltinRule::Ssn,
        r"\b\d{3}[ .\-]\d{2}[ .\-]\d{4}\b",
        Category::UsSocialSecurityNumber,
    ),
];

/// Read-only table shared by every redactor, in application order
pub static CATALOG: Lazy<Vec<CatalogEntry>> = Lazy::new(|| {
    PATTERN_DEFS
        .iter()
        .map(|(rule, pattern, category)| CatalogEntry {
            rule: *rule,
            category: *category,
            regex: Regex::new(pattern).expect("built-in pattern must compile"),
        })
        .collect()
});

/// A matcher bound to the category it reports
#[derive(Debug, Clone)]
pub struct Rule {
    regex: Regex,
    category: Category,
}

impl Rule {
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    pub fn category(&self) -> Category {
        self.category
    }
}

/// Ordered, immutable rules plus a RegexSet for fast "any match" checks
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
    any: RegexSet,
}

impl RuleSet {
    fn new(rules: Vec<Rule>) -> Result<Self, RedactError> {
        // Handle empty rule set gracefully (everything disabled)
        let any = if rules.is_empty() {
            RegexSet::empty()
        } else {
            RegexSet::new(rules.iter().map(|rule| rule.regex.as_str()))
                .map_err(RedactError::RuleSet)?
        };

        Ok(Self { rules, any })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.rules.iter().map(Rule::category).collect()
    }

    /// True if any rule matches anywhere in `text`
    pub fn is_match(&self, text: &str) -> bool {
        self.any.is_match(text)
    }
}

/// Build the rule set for one redactor
///
/// Enabled built-ins come first in catalog order, then custom patterns in
/// the order given, each labeled [`Category::Digits`]. Unknown or disabled
/// identifiers are skipped. A custom pattern that fails to compile is an
/// error here rather than at first use.
pub fn build_rule_set(config: &RedactorConfig) -> Result<RuleSet, RedactError> {
    if let Some(rules) = &config.rules {
        for name in rules.keys() {
            if BuiltinRule::from_name(name).is_none() {
                debug!(rule = %name, "ignoring unknown rule identifier");
            }
        }
    }

    let mut rules: Vec<Rule> = CATALOG
        .iter()
        .filter(|entry| config.is_enabled(entry.rule))
        .map(|entry| Rule {
            regex: entry.regex.clone(),
            category: entry.category,
        })
        .collect();

    for pattern in &config.custom_rules {
        let regex = Regex::new(pattern).map_err(|source| RedactError::InvalidPattern {
            pattern: pattern.clone(),
            source,
        })?;
        rules.push(Rule {
            regex,
            category: Category::Digits,
        });
    }

    let rule_set = RuleSet::new(rules)?;
    debug!(
        rules = rule_set.len(),
        custom = config.custom_rules.len(),
        "built rule set"
    );
    Ok(rule_set)
}

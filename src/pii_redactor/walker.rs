// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Recursive redaction of JSON-shaped values

use serde_json::{Map, Value};

use super::redactor::Redactor;
use super::replacement::RedactionEvent;

/// Result of redacting a nested value
#[derive(Debug, Clone, PartialEq)]
pub struct StructureRedaction {
    pub value: Value,
    pub events: Vec<RedactionEvent>,
}

impl Redactor {
    /// Deep copy of `value` with every string leaf redacted
    ///
    /// Object keys, numbers, booleans and nulls are copied unchanged. Events
    /// from every leaf are reported as a single batch.
    pub fn redact_structure(&self, value: &Value) -> Value {
        self.redact_structure_with_events(value).value
    }

    pub fn redact_structure_with_events(&self, value: &Value) -> StructureRedaction {
        let mut events = Vec::new();
        let value = self.walk(value, &mut events);
        self.report(&events);
        StructureRedaction { value, events }
    }

    fn walk(&self, value: &Value, events: &mut Vec<RedactionEvent>) -> Value {
        match value {
            Value::String(text) => Value::String(self.redact_into(text, events).into_owned()),
            Value::Array(items) => {
                Value::Array(items.iter().map(|item| self.walk(item, events)).collect())
            }
            Value::Object(fields) => {
                let mut redacted = Map::with_capacity(fields.len());
                for (key, field) in fields {
                    redacted.insert(key.clone(), self.walk(field, events));
                }
                Value::Object(redacted)
            }
            Value::Null | Value::Bool(_) | Value::Number(_) => value.clone(),
        }
    }
}

// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Python bindings for the PII redactor

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList, PyString, PyTuple};
use std::collections::HashMap;

use crate::pii_redactor::{RedactionEvent, Redactor, RedactorConfig};

// Flag bits from Python's `re` module
const RE_IGNORECASE: u32 = 2;
const RE_MULTILINE: u32 = 8;
const RE_DOTALL: u32 = 16;
const RE_VERBOSE: u32 = 64;
const RE_ASCII: u32 = 256;

/// PII redactor exposed to Python
///
/// # Example (Python)
/// ```python
/// import re
/// from redactpii import Redactor
///
/// redactor = Redactor({
///     "rules": {"EMAIL": True},
///     "custom_rules": [re.compile(r"\b\d{5}\b")],
/// })
/// redactor.redact("Email: test@example.com, Code: 12345")
/// # 'Email: EMAIL_ADDRESS, Code: DIGITS'
/// redactor.redact_object({"email": "john@example.com", "age": 42})
/// # {'email': 'EMAIL_ADDRESS', 'age': 42}
/// ```
#[pyclass(name = "Redactor", module = "redactpii", frozen)]
pub struct PyRedactor {
    inner: Redactor,
}

#[pymethods]
impl PyRedactor {
    /// Create a redactor
    ///
    /// # Option Keys
    /// * `rules` (dict[str, bool]): built-ins to enable (default: all)
    /// * `custom_rules` (list[str | re.Pattern]): extra patterns, labeled DIGITS
    /// * `global_replace_with` (str): replacement for every match
    /// * `api_key` (str): enables dashboard reporting
    /// * `api_url` (str): dashboard endpoint
    /// * `fail_silent` (bool): suppress reporting errors (default: True)
    /// * `hook_timeout` (int): reporting timeout in milliseconds (default: 500)
    #[new]
    #[pyo3(signature = (options = None))]
    fn new(options: Option<&Bound<'_, PyDict>>) -> PyResult<Self> {
        let config = match options {
            Some(dict) => config_from_py_dict(dict)?,
            None => RedactorConfig::default(),
        };

        let inner = Redactor::builder(config)
            .sdk_language("python")
            .build()
            .map_err(|e| PyValueError::new_err(format!("Invalid redactor options: {}", e)))?;

        Ok(Self { inner })
    }

    fn redact(&self, text: &str) -> String {
        self.inner.redact(text)
    }

    fn has_pii(&self, text: &str) -> bool {
        self.inner.has_pii(text)
    }

    /// Copy of `obj` with every string inside dicts, lists and tuples redacted
    fn redact_object(&self, obj: &Bound<'_, PyAny>) -> PyResult<Py<PyAny>> {
        let mut events = Vec::new();
        let redacted = self.walk(obj, &mut events)?;
        self.inner.report(&events);
        Ok(redacted.unbind())
    }
}

impl PyRedactor {
    fn walk<'py>(
        &self,
        obj: &Bound<'py, PyAny>,
        events: &mut Vec<RedactionEvent>,
    ) -> PyResult<Bound<'py, PyAny>> {
        let py = obj.py();

        if let Ok(text) = obj.extract::<String>() {
            let redacted = self.inner.redact_into(&text, events);
            return Ok(PyString::new(py, &redacted).into_any());
        }

        if let Ok(dict) = obj.downcast::<PyDict>() {
            let new_dict = PyDict::new(py);
            for (key, value) in dict.iter() {
                new_dict.set_item(key, self.walk(&value, events)?)?;
            }
            return Ok(new_dict.into_any());
        }

        if let Ok(list) = obj.downcast::<PyList>() {
            let new_list = PyList::empty(py);
            for item in list.iter() {
                new_list.append(self.walk(&item, events)?)?;
            }
            return Ok(new_list.into_any());
        }

        if let Ok(tuple) = obj.downcast::<PyTuple>() {
            let items = tuple
                .iter()
                .map(|item| self.walk(&item, events))
                .collect::<PyResult<Vec<_>>>()?;
            return Ok(PyTuple::new(py, items)?.into_any());
        }

        // Numbers, bools, None and anything else pass through
        Ok(obj.clone())
    }
}

/// Build a config from the Python options dict
fn config_from_py_dict(dict: &Bound<'_, PyDict>) -> PyResult<RedactorConfig> {
    let mut config = RedactorConfig::default();

    macro_rules! extract_field {
        ($field:ident) => {
            if let Some(value) = dict.get_item(stringify!($field))? {
                if !value.is_none() {
                    config.$field = value.extract()?;
                }
            }
        };
    }

    extract_field!(api_key);
    extract_field!(api_url);
    extract_field!(fail_silent);
    extract_field!(hook_timeout);
    extract_field!(global_replace_with);

    if let Some(value) = dict.get_item("rules")? {
        if !value.is_none() {
            config.rules = Some(value.extract::<HashMap<String, bool>>()?);
        }
    }

    if let Some(value) = dict.get_item("custom_rules")? {
        if !value.is_none() {
            for item in value.try_iter()? {
                config.custom_rules.push(custom_rule_source(&item?)?);
            }
        }
    }

    Ok(config)
}

/// Accept either a pattern string or a compiled `re.Pattern`
fn custom_rule_source(item: &Bound<'_, PyAny>) -> PyResult<String> {
    if let Ok(pattern) = item.extract::<String>() {
        return Ok(pattern);
    }

    let pattern: String = item.getattr("pattern")?.extract()?;
    let flags: u32 = item.getattr("flags")?.extract()?;
    let pattern = if flags & RE_ASCII != 0 {
        ascii_classes(&pattern)
    } else {
        pattern
    };
    Ok(format!("{}{}", inline_flags(flags), pattern))
}

/// Translate `re` flags into a regex inline flag group
fn inline_flags(flags: u32) -> String {
    let mut inline = String::new();
    for (bit, flag) in [
        (RE_IGNORECASE, 'i'),
        (RE_MULTILINE, 'm'),
        (RE_DOTALL, 's'),
        (RE_VERBOSE, 'x'),
    ] {
        if flags & bit != 0 {
            inline.push(flag);
        }
    }

    if inline.is_empty() {
        inline
    } else {
        format!("(?{})", inline)
    }
}

/// Rewrite `\w`, `\d`, `\s`, `\b` and their negations to ASCII-only forms
///
/// `.` and user-written classes keep Unicode semantics. `\B` is left as is,
/// since `(?-u:\B)` cannot be compiled for `&str` haystacks.
fn ascii_classes(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut chars = pattern.chars().peekable();
    let mut in_class = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped) => out.push_str(&ascii_escape(escaped, in_class)),
                None => out.push(c),
            },
            '[' if !in_class => {
                in_class = true;
                out.push(c);
                if chars.peek() == Some(&'^') {
                    out.push('^');
                    chars.next();
                }
                // A leading `]` is a literal
                if chars.peek() == Some(&']') {
                    out.push(']');
                    chars.next();
                }
            }
            ']' if in_class => {
                in_class = false;
                out.push(c);
            }
            _ => out.push(c),
        }
    }

    out
}

fn ascii_escape(escaped: char, in_class: bool) -> String {
    const WORD: &str = "0-9A-Za-z_";
    const DIGIT: &str = "0-9";
    const SPACE: &str = r"\t\n\x0B\f\r\x20";

    let positive = |set: &str| {
        if in_class {
            set.to_string()
        } else {
            format!("[{}]", set)
        }
    };

    match escaped {
        'w' => positive(WORD),
        'd' => positive(DIGIT),
        's' => positive(SPACE),
        // Nested negated classes are valid inside a bracket too
        'W' => format!("[^{}]", WORD),
        'D' => format!("[^{}]", DIGIT),
        'S' => format!("[^{}]", SPACE),
        'b' if in_class => r"\x08".to_string(),
        'b' => r"(?-u:\b)".to_string(),
        other => format!("\\{}", other),
    }
}

/// Python module: redactpii
#[pymodule]
fn redactpii(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyRedactor>()?;

    // Module metadata
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add(
        "__doc__",
        "Rule-based PII redaction for text and JSON-shaped data",
    )?;

    Ok(())
}

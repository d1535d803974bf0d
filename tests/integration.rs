// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Integration tests for the PII redactor public API

use redactpii::{BuiltinRule, Category, RedactError, RedactionEvent, Redactor, RedactorConfig};
use serde_json::json;
use std::sync::Arc;
use std::thread;

fn redactor_with(rules: &[BuiltinRule]) -> Redactor {
    Redactor::new(RedactorConfig::only(rules)).expect("Failed to create redactor")
}

#[test]
fn test_redact_email() {
    let redactor = redactor_with(&[BuiltinRule::Email]);
    assert!(redactor.redact("test@example.com").contains("EMAIL_ADDRESS"));
    assert!(redactor
        .redact("Contact test@example.com for details")
        .contains("EMAIL_ADDRESS"));
}

#[test]
fn test_redact_credit_card() {
    let redactor = redactor_with(&[BuiltinRule::CreditCard]);
    assert_eq!(redactor.redact("1234-5678-9012-3456"), "CREDIT_CARD_NUMBER");
    assert_eq!(
        redactor.redact("Card: 1234 5678 9012 3456"),
        "Card: CREDIT_CARD_NUMBER"
    );
}

#[test]
fn test_redact_ssn() {
    let redactor = redactor_with(&[BuiltinRule::Ssn]);
    assert!(redactor
        .redact("123-45-6789")
        .contains("US_SOCIAL_SECURITY_NUMBER"));
    assert_eq!(
        redactor.redact("SSN: 123.45.6789"),
        "SSN: US_SOCIAL_SECURITY_NUMBER"
    );
}

#[test]
fn test_redact_phone() {
    let redactor = redactor_with(&[BuiltinRule::Phone]);
    assert_eq!(redactor.redact("555-123-4567"), "PHONE_NUMBER");
    assert_eq!(redactor.redact("Call (555) 123-4567"), "Call PHONE_NUMBER");
}

#[test]
fn test_redact_phone_groupings_and_codes() {
    let redactor = redactor_with(&[BuiltinRule::Phone]);
    assert_eq!(redactor.redact("1234 5678"), "PHONE_NUMBER");
    assert_eq!(redactor.redact("ABC1234 code"), "PHONE_NUMBER code");
    assert_eq!(redactor.redact("abc1234"), "abc1234");
    assert!(!redactor.has_pii("abc1234"));
}

#[test]
fn test_redact_name() {
    let redactor = redactor_with(&[BuiltinRule::Name]);
    assert_eq!(
        redactor.redact("Hi John Smith, how are you?"),
        "PERSON_NAME, how are you?"
    );
    assert!(redactor.redact("Dear Jane Doe,").contains("PERSON_NAME"));
}

#[test]
fn test_redact_multiple_pii_types() {
    let redactor = redactor_with(&[BuiltinRule::Email, BuiltinRule::Phone, BuiltinRule::Ssn]);
    let result =
        redactor.redact("Email: test@example.com, Phone: 555-123-4567, SSN: 123-45-6789");

    assert_eq!(
        result,
        "Email: EMAIL_ADDRESS, Phone: PHONE_NUMBER, SSN: US_SOCIAL_SECURITY_NUMBER"
    );
}

#[test]
fn test_all_rules_enabled_by_default() {
    let redactor = Redactor::new(RedactorConfig::default()).unwrap();
    let result = redactor.redact("Hi David Johnson, call 555-555-5555 or email david@example.com");

    assert!(result.contains("PERSON_NAME"));
    assert!(result.contains("PHONE_NUMBER"));
    assert!(result.contains("EMAIL_ADDRESS"));
    assert!(!result.contains("david@example.com"));
    assert!(!result.contains("Johnson"));
}

#[test]
fn test_global_replace_with() {
    let config = RedactorConfig::only(&[BuiltinRule::Email, BuiltinRule::Ssn])
        .with_global_replacement("[REDACTED]");
    let redactor = Redactor::new(config).unwrap();

    assert_eq!(redactor.redact("test@example.com"), "[REDACTED]");
    assert_eq!(
        redactor.redact("a@x.com then 123-45-6789"),
        "[REDACTED] then [REDACTED]"
    );
}

#[test]
fn test_disabled_rules() {
    let config = RedactorConfig::default().with_rule(BuiltinRule::Email, false);
    let redactor = Redactor::new(config).unwrap();

    assert_eq!(redactor.redact("test@example.com"), "test@example.com");
    assert!(!redactor.has_pii("test@example.com"));
}

#[test]
fn test_unknown_rule_identifiers_ignored() {
    let config: RedactorConfig =
        serde_json::from_value(json!({"rules": {"EMAIL": true, "PASSPORT": true}})).unwrap();
    let redactor = Redactor::new(config).unwrap();

    assert_eq!(redactor.rules().len(), 1);
    assert_eq!(redactor.redact("test@example.com"), "EMAIL_ADDRESS");
}

#[test]
fn test_empty_and_whitespace() {
    let redactor = Redactor::new(RedactorConfig::default()).unwrap();
    assert_eq!(redactor.redact(""), "");
    assert_eq!(redactor.redact("   "), "   ");
    assert_eq!(redactor.redact("\n\n"), "\n\n");
}

#[test]
fn test_no_pii() {
    let redactor = Redactor::new(RedactorConfig::default()).unwrap();
    let text = "This is plain text with no sensitive information";
    assert_eq!(redactor.redact(text), text);
    assert!(!redactor.has_pii(text));
}

#[test]
fn test_has_pii() {
    let redactor = redactor_with(&[BuiltinRule::Email, BuiltinRule::Phone, BuiltinRule::Ssn]);
    assert!(redactor.has_pii("test@example.com"));
    assert!(redactor.has_pii("555-123-4567"));
    assert!(redactor.has_pii("123-45-6789"));
    assert!(!redactor.has_pii("This is plain text"));
    assert!(!redactor.has_pii(""));
}

#[test]
fn test_multiple_instances_all_replaced() {
    let redactor = redactor_with(&[BuiltinRule::Email]);
    let result = redactor.redact_with_events("a@x.com and b@y.com");

    assert_eq!(result.text.matches("EMAIL_ADDRESS").count(), 2);
    assert_eq!(result.events.len(), 2);
}

#[test]
fn test_pii_at_boundaries_and_special_characters() {
    let redactor = redactor_with(&[BuiltinRule::Email]);
    assert_eq!(
        redactor.redact("test@example.com is my email"),
        "EMAIL_ADDRESS is my email"
    );
    assert_eq!(
        redactor.redact("My email is test@example.com"),
        "My email is EMAIL_ADDRESS"
    );
    assert_eq!(redactor.redact("Contact test+tag@example.com"), "Contact EMAIL_ADDRESS");
}

#[test]
fn test_custom_rules() {
    let config = RedactorConfig::only(&[]).with_custom_rule(r"\b\d{5}\b");
    let redactor = Redactor::new(config).unwrap();

    assert_eq!(redactor.redact("My code is 12345"), "My code is DIGITS");
}

#[test]
fn test_combine_builtin_and_custom_rules() {
    let config = RedactorConfig::only(&[BuiltinRule::Email]).with_custom_rule(r"\b\d{5}\b");
    let redactor = Redactor::new(config).unwrap();
    let result = redactor.redact_with_events("Email: test@example.com, Code: 12345");

    assert_eq!(result.text, "Email: EMAIL_ADDRESS, Code: DIGITS");
    assert_eq!(
        result.events,
        vec![
            RedactionEvent::redacted(Category::EmailAddress),
            RedactionEvent::redacted(Category::Digits),
        ]
    );
}

#[test]
fn test_invalid_custom_rule() {
    let result = Redactor::new(RedactorConfig::default().with_custom_rule(r"\d{5"));
    match result {
        Err(err @ RedactError::InvalidPattern { .. }) => {
            assert!(err.to_string().contains(r"\d{5"));
        }
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("malformed pattern accepted"),
    }
}

#[test]
fn test_redact_structure() {
    let redactor = redactor_with(&[BuiltinRule::Email]);
    let input = json!({
        "email": "test@example.com",
        "name": "John",
        "emails": ["test1@example.com", "test2@example.com"],
        "null_value": null,
    });

    let result = redactor.redact_structure(&input);

    assert_eq!(result["email"], "EMAIL_ADDRESS");
    assert_eq!(result["name"], "John");
    assert_eq!(result["emails"], json!(["EMAIL_ADDRESS", "EMAIL_ADDRESS"]));
    assert!(result["null_value"].is_null());
    assert_eq!(input["email"], "test@example.com");
}

#[test]
fn test_redact_structure_empty() {
    let redactor = Redactor::new(RedactorConfig::default()).unwrap();
    assert_eq!(redactor.redact_structure(&json!({})), json!({}));
    assert_eq!(
        redactor.redact_structure(&json!({"items": []})),
        json!({"items": []})
    );
}

#[test]
fn test_identical_input_identical_output() {
    let redactor = Redactor::new(RedactorConfig::default()).unwrap();
    let text = "Dear Jane Doe. Your SSN 123-45-6789 and card 1234 5678 9012 3456 are on file.";
    assert_eq!(redactor.redact(text), redactor.redact(text));
}

#[test]
fn test_concurrent_use() {
    let redactor = Arc::new(redactor_with(&[BuiltinRule::Email, BuiltinRule::Ssn]));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let redactor = Arc::clone(&redactor);
            thread::spawn(move || {
                let text = format!("user{}@example.com / 123-45-6789", i);
                (redactor.redact(&text), redactor.has_pii(&text))
            })
        })
        .collect();

    for handle in handles {
        let (redacted, has_pii) = handle.join().unwrap();
        assert_eq!(redacted, "EMAIL_ADDRESS / US_SOCIAL_SECURITY_NUMBER");
        assert!(has_pii);
    }
}

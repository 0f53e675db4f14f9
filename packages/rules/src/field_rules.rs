use serde_json::Value;
use validation::{rule, FieldError, State, ValidationResult, ValidationRule};

use crate::password::password_violations;

fn text<'a>(state: &'a State, key: &str) -> Option<&'a str> {
    state.get(key).and_then(Value::as_str)
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// Fails when the field is missing, null or a blank string
pub fn required(field_label: &str) -> ValidationRule {
    let message = format!("{} cannot be empty", field_label);
    rule(move |state: &State, key: &str, _: Option<&str>| {
        is_blank(state.get(key)).then(|| FieldError::new(message.as_str()))
    })
}

pub fn email() -> ValidationRule {
    rule(|state: &State, key: &str, _: Option<&str>| {
        let email = text(state, key).unwrap_or_default();
        if email.trim().is_empty() {
            return Some(FieldError::new("Email cannot be empty"));
        }

        // Basic email format validation
        if !email.contains('@') || !email.contains('.') {
            return Some(FieldError::new("Email format is invalid"));
        }
        None
    })
}

/// Reports every strength requirement the password fails, not just the first
pub fn password(field_label: &str) -> ValidationRule {
    let empty = format!("{} cannot be empty", field_label);
    rule(move |state: &State, key: &str, _: Option<&str>| {
        let password = text(state, key).unwrap_or_default();
        if password.trim().is_empty() {
            return ValidationResult::error(empty.as_str());
        }

        let violations = password_violations(password);
        if violations.is_empty() {
            return ValidationResult::Absent;
        }
        ValidationResult::List(violations.into_iter().map(FieldError::from).collect())
    })
}

/// Fails when the field holds the same value as `other_key` in the same update
pub fn differs_from(other_key: &str, message: &str) -> ValidationRule {
    let other_key = other_key.to_string();
    let message = message.to_string();
    rule(move |state: &State, key: &str, _: Option<&str>| {
        match (state.get(key), state.get(other_key.as_str())) {
            (Some(value), Some(other)) if value == other => Some(FieldError::new(message.as_str())),
            _ => None,
        }
    })
}

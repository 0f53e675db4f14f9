use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::component::{State, ERRORS_KEY};

/// A mapping of field names to their validation error messages
pub type ValidationErrors = HashMap<String, Vec<String>>;

/// A single error object produced by a validation rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub message: String,
}

impl FieldError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message.as_str())
    }
}

impl std::error::Error for FieldError {}

impl From<&str> for FieldError {
    fn from(message: &str) -> Self {
        FieldError::new(message)
    }
}

impl From<String> for FieldError {
    fn from(message: String) -> Self {
        FieldError::new(message)
    }
}

// Helper trait for collecting validation errors
pub trait ValidationErrorsExt {
    fn add_error(&mut self, field: &str, message: String);

    /// Object for the reserved `errors` slot, fields ordered as in `fields`
    fn to_json<'a>(&self, fields: impl IntoIterator<Item = &'a str>) -> Map<String, Value>;
}

impl ValidationErrorsExt for ValidationErrors {
    fn add_error(&mut self, field: &str, message: String) {
        self.entry(field.to_string())
            .or_insert_with(Vec::new)
            .push(message);
    }

    fn to_json<'a>(&self, fields: impl IntoIterator<Item = &'a str>) -> Map<String, Value> {
        fields
            .into_iter()
            .filter_map(|field| {
                self.get(field)
                    .map(|messages| (field.to_string(), Value::from(messages.clone())))
            })
            .collect()
    }
}

/// Read the reserved `errors` slot of a state back into a typed map.
///
/// Returns an empty map when the slot is missing or does not have the
/// field → messages shape.
pub fn errors_of(state: &State) -> ValidationErrors {
    state
        .get(ERRORS_KEY)
        .cloned()
        .and_then(|errors| serde_json::from_value(errors).ok())
        .unwrap_or_default()
}

/// Errors raised while decorating a component type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecorateError {
    /// No component type was handed to the decorator
    MissingComponent,
}

impl fmt::Display for DecorateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecorateError::MissingComponent => write!(
                f,
                "a component type must be supplied to the state validation decorator"
            ),
        }
    }
}

impl std::error::Error for DecorateError {}

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::component::State;
use crate::diagnostics::Diagnostics;
use crate::result::ValidationResult;

/// A field rule: `(candidate state, field name, component display name)`
pub type ValidationRule = Arc<dyn Fn(&State, &str, Option<&str>) -> ValidationResult + Send + Sync>;

/// Wrap a closure as a [`ValidationRule`].
///
/// The closure may return anything convertible into a [`ValidationResult`],
/// e.g. `()`, a [`FieldError`](crate::FieldError), a `Vec` of them or an
/// `Option`.
pub fn rule<F, R>(f: F) -> ValidationRule
where
    F: Fn(&State, &str, Option<&str>) -> R + Send + Sync + 'static,
    R: Into<ValidationResult>,
{
    Arc::new(move |state: &State, key: &str, display_name: Option<&str>| {
        f(state, key, display_name).into()
    })
}

/// One declared entry of a component's validations
#[derive(Clone)]
pub enum RuleEntry {
    Rule(ValidationRule),
    /// Declared, but not something that can be called
    NotInvocable { kind: String },
}

impl fmt::Debug for RuleEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleEntry::Rule(_) => f.write_str("Rule(..)"),
            RuleEntry::NotInvocable { kind } => write!(f, "NotInvocable({kind})"),
        }
    }
}

/// Field name → rule declarations of one component type
#[derive(Clone, Debug, Default)]
pub struct Validations {
    entries: Vec<(String, RuleEntry)>,
}

impl Validations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `rule` for `key`, replacing any earlier declaration
    pub fn rule(self, key: impl Into<String>, rule: ValidationRule) -> Self {
        self.entry(key, RuleEntry::Rule(rule))
    }

    /// Declare a raw value where a rule was expected.
    ///
    /// Such entries are kept so the key validator can report them, but they
    /// never run.
    pub fn declare_value(self, key: impl Into<String>, value: Value) -> Self {
        let kind = json_kind(&value).to_string();
        self.entry(key, RuleEntry::NotInvocable { kind })
    }

    pub fn entry(mut self, key: impl Into<String>, entry: RuleEntry) -> Self {
        let key = key.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = entry,
            None => self.entries.push((key, entry)),
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&RuleEntry> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, entry)| entry)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Arguments of one key validation
#[derive(Clone, Copy)]
pub struct KeyValidation<'a> {
    pub state: &'a Map<String, Value>,
    pub key: &'a str,
    pub validations: &'a Validations,
    pub display_name: Option<&'a str>,
}

/// Run the rule declared for `key`, if any.
///
/// Keys without a rule come back `Absent`. An entry that cannot be called is
/// reported to `diagnostics` and also comes back `Absent`.
pub fn validate_key(args: KeyValidation<'_>, diagnostics: &dyn Diagnostics) -> ValidationResult {
    let KeyValidation {
        state,
        key,
        validations,
        display_name,
    } = args;

    match validations.get(key) {
        None => ValidationResult::Absent,
        Some(RuleEntry::NotInvocable { .. }) => {
            diagnostics.warn(key, &format!("state validations for {key} needs to be a function"));
            ValidationResult::Absent
        }
        Some(RuleEntry::Rule(rule)) => rule(state, key, display_name),
    }
}

use crate::errors::FieldError;

/// Outcome of running one field's validation rule.
///
/// The shape is fixed when the rule returns, so the flattening step is a
/// plain match instead of probing the value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ValidationResult {
    /// The field is valid, or no rule ran for it
    #[default]
    Absent,
    /// One error object
    Single(FieldError),
    /// An ordered sequence of error objects
    List(Vec<FieldError>),
}

impl ValidationResult {
    pub fn is_absent(&self) -> bool {
        matches!(self, ValidationResult::Absent)
    }

    /// Shorthand for a single error carrying `message`
    pub fn error(message: impl Into<String>) -> Self {
        ValidationResult::Single(FieldError::new(message))
    }
}

impl From<()> for ValidationResult {
    fn from(_: ()) -> Self {
        ValidationResult::Absent
    }
}

impl From<FieldError> for ValidationResult {
    fn from(error: FieldError) -> Self {
        ValidationResult::Single(error)
    }
}

impl From<Vec<FieldError>> for ValidationResult {
    fn from(errors: Vec<FieldError>) -> Self {
        ValidationResult::List(errors)
    }
}

impl From<Option<FieldError>> for ValidationResult {
    fn from(error: Option<FieldError>) -> Self {
        match error {
            Some(error) => ValidationResult::Single(error),
            None => ValidationResult::Absent,
        }
    }
}

impl From<Result<(), FieldError>> for ValidationResult {
    fn from(result: Result<(), FieldError>) -> Self {
        match result {
            Ok(()) => ValidationResult::Absent,
            Err(error) => ValidationResult::Single(error),
        }
    }
}

pub mod component;
pub mod decorator;
pub mod diagnostics;
pub mod errors;
pub mod flatten;
pub mod key_validator;
pub mod result;

#[cfg(test)]
pub mod test_helpers;

// Re-export common types and functions
pub use component::{Component, ComponentType, Instance, State, ERRORS_KEY};
pub use decorator::{state_validation, state_validation_with, validate_state};
pub use diagnostics::{Diagnostics, NoopDiagnostics, TracingDiagnostics};
pub use errors::{errors_of, DecorateError, FieldError, ValidationErrors, ValidationErrorsExt};
pub use flatten::flatten_errors;
pub use key_validator::{rule, validate_key, KeyValidation, RuleEntry, ValidationRule, Validations};
pub use result::ValidationResult;

//! Stock field rules for components decorated with state validation.

pub mod field_rules;
pub mod password;

pub use field_rules::{differs_from, email, password, required};
pub use password::{password_violations, PasswordValidationError};

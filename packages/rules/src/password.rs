use std::fmt;

use validation::FieldError;

/// Various types of password validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordValidationError {
    /// Password is too short
    TooShort,
    /// Password is missing an uppercase letter
    MissingUppercase,
    /// Password is missing a lowercase letter
    MissingLowercase,
    /// Password is missing a digit
    MissingDigit,
    /// Password is missing a special character
    MissingSpecialChar,
    /// Password is a commonly used password
    CommonPassword,
}

impl fmt::Display for PasswordValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PasswordValidationError::TooShort =>
                write!(f, "Password must be at least {} characters long", MIN_LENGTH),
            PasswordValidationError::MissingUppercase =>
                write!(f, "Password must contain at least one uppercase letter"),
            PasswordValidationError::MissingLowercase =>
                write!(f, "Password must contain at least one lowercase letter"),
            PasswordValidationError::MissingDigit =>
                write!(f, "Password must contain at least one digit"),
            PasswordValidationError::MissingSpecialChar =>
                write!(f, "Password must contain at least one special character"),
            PasswordValidationError::CommonPassword =>
                write!(f, "Password is too common and easily guessable"),
        }
    }
}

impl std::error::Error for PasswordValidationError {}

impl From<PasswordValidationError> for FieldError {
    fn from(e: PasswordValidationError) -> Self {
        FieldError::new(e.to_string())
    }
}

const MIN_LENGTH: usize = 12;

// Could use an actual list in production
const COMMON_PASSWORDS: [&str; 3] = ["Password123!", "Qwerty123!", "Admin123!"];

/// Every requirement `password` fails, in the order they are checked
pub fn password_violations(password: &str) -> Vec<PasswordValidationError> {
    let mut violations = Vec::new();

    if password.chars().count() < MIN_LENGTH {
        violations.push(PasswordValidationError::TooShort);
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        violations.push(PasswordValidationError::MissingUppercase);
    }
    if !password.chars().any(|c| c.is_lowercase()) {
        violations.push(PasswordValidationError::MissingLowercase);
    }
    if !password.chars().any(|c| c.is_numeric()) {
        violations.push(PasswordValidationError::MissingDigit);
    }
    if password.chars().all(|c| c.is_alphanumeric()) {
        violations.push(PasswordValidationError::MissingSpecialChar);
    }
    if COMMON_PASSWORDS.contains(&password) {
        violations.push(PasswordValidationError::CommonPassword);
    }

    violations
}

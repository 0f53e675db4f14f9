use crate::result::ValidationResult;

/// Normalize a rule result into its ordered error messages.
///
/// `Absent` flattens to an empty sequence.
pub fn flatten_errors(result: &ValidationResult) -> Vec<String> {
    match result {
        ValidationResult::Absent => Vec::new(),
        ValidationResult::Single(error) => vec![error.message.clone()],
        ValidationResult::List(errors) => errors.iter().map(|error| error.message.clone()).collect(),
    }
}

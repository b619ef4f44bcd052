mod document_validator;
pub mod rules;
#[cfg(test)]
mod tests;
mod validation_result;

pub use document_validator::DocumentValidator;
pub use document_validator::ValidationRule;
pub use validation_result::ValidationError;
pub use validation_result::ValidationResult;

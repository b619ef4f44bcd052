use crate::loc;
use serde::Serialize;

/// One document-structure violation: a client-facing message plus the
/// position(s) of every offending syntax node.
///
/// Serializes to the shape of an entry in a GraphQL response's `errors` list.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ValidationError {
    pub locations: Vec<loc::FilePosition>,
    pub message: String,
    #[serde(skip)]
    pub rule: &'static str,
}
impl ValidationError {
    pub fn new(
        rule: &'static str,
        message: impl Into<String>,
        locations: Vec<loc::FilePosition>,
    ) -> Self {
        Self {
            locations,
            message: message.into(),
            rule,
        }
    }
}
impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        for location in &self.locations {
            write!(f, " [{location}]")?;
        }
        Ok(())
    }
}

/// The outcome of running a validation pipeline over a document: either
/// empty success or a non-empty ordered error list.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
}
impl ValidationResult {
    pub fn success() -> Self {
        Self { errors: vec![] }
    }

    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
impl std::fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.errors.is_empty() {
            return write!(f, "document is valid");
        }
        for (idx, error) in self.errors.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

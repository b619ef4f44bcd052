use crate::document::Document;
use crate::schema::Schema;
use crate::validation::ValidationError;
use crate::validation::ValidationResult;
use crate::validation::rules;

/// One independent document-structure rule.
///
/// Rules must not mutate the schema or the document, and must report every
/// violation they find rather than stopping at the first.
pub trait ValidationRule {
    fn name(&self) -> &'static str;

    fn validate(&self, schema: &Schema, document: &Document) -> Vec<ValidationError>;
}

/// Runs a set of [`ValidationRule`]s over a document and aggregates every
/// violation into one [`ValidationResult`].
pub struct DocumentValidator {
    rules: Vec<Box<dyn ValidationRule>>,
}
impl DocumentValidator {
    /// A validator with the default rule set.
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(rules::ExecutableDefinitionsRule),
                Box::new(rules::OperationNameUniquenessRule),
                Box::new(rules::LoneAnonymousOperationRule),
                Box::new(rules::KnownFragmentsRule),
                Box::new(rules::FragmentCyclesRule),
                Box::new(rules::FieldSelectionsRule),
            ],
        }
    }

    /// A validator with no rules. Compose with [`DocumentValidator::with_rule`].
    pub fn empty() -> Self {
        Self { rules: vec![] }
    }

    pub fn with_rule(mut self, rule: Box<dyn ValidationRule>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Run every registered rule, concatenating their error lists in rule
    /// registration order. A rule producing zero errors contributes nothing.
    pub fn validate(&self, schema: &Schema, document: &Document) -> ValidationResult {
        let mut errors = vec![];
        for rule in &self.rules {
            errors.extend(rule.validate(schema, document));
        }
        ValidationResult::from_errors(errors)
    }
}
impl Default for DocumentValidator {
    fn default() -> Self {
        Self::new()
    }
}

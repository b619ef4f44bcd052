use crate::ast;
use crate::document::Document;
use crate::schema::Schema;
use crate::validation::ValidationError;
use crate::validation::ValidationRule;

/// GraphQL spec 5.2.2.1 (Lone Anonymous Operation): an anonymous operation
/// may only appear when it is the document's sole operation.
///
/// Emits a single aggregate error citing every anonymous operation node.
pub struct LoneAnonymousOperationRule;

impl ValidationRule for LoneAnonymousOperationRule {
    fn name(&self) -> &'static str {
        "lone-anonymous-operation"
    }

    fn validate(&self, _schema: &Schema, document: &Document) -> Vec<ValidationError> {
        let operation_count = document.operations().count();
        if operation_count <= 1 {
            return vec![];
        }

        let anonymous_positions: Vec<_> = document
            .operations()
            .filter(|op| ast::query::operation_name(op).is_none())
            .map(|op| document.position(&ast::query::operation_position(op)))
            .collect();

        if anonymous_positions.is_empty() {
            return vec![];
        }

        vec![ValidationError::new(
            self.name(),
            "An anonymous operation must be the only defined operation in \
            the document.",
            anonymous_positions,
        )]
    }
}

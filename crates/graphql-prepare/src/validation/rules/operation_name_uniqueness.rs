use crate::ast;
use crate::document::Document;
use crate::schema::Schema;
use crate::validation::ValidationError;
use crate::validation::ValidationRule;
use indexmap::IndexMap;

/// GraphQL spec 5.2.1.1 (Operation Name Uniqueness): every named operation's
/// name must be unique within the document. Anonymous operations are ignored
/// by this rule.
///
/// One error is emitted per duplicated name, citing all conflicting nodes,
/// in the order names were first encountered.
pub struct OperationNameUniquenessRule;

impl ValidationRule for OperationNameUniquenessRule {
    fn name(&self) -> &'static str {
        "operation-name-uniqueness"
    }

    fn validate(&self, _schema: &Schema, document: &Document) -> Vec<ValidationError> {
        let mut buckets: IndexMap<&str, Vec<ast::Pos>> = IndexMap::new();
        for op in document.operations() {
            if let Some(op_name) = ast::query::operation_name(op) {
                buckets
                    .entry(op_name)
                    .or_default()
                    .push(ast::query::operation_position(op));
            }
        }

        buckets
            .into_iter()
            .filter(|(_, positions)| positions.len() > 1)
            .map(|(op_name, positions)| ValidationError::new(
                self.name(),
                format!("There can be only one operation named \"{op_name}\"."),
                positions.iter().map(|pos| document.position(pos)).collect(),
            ))
            .collect()
    }
}

use crate::ast;
use crate::document::Document;
use crate::schema::Schema;
use crate::validation::ValidationError;
use crate::validation::ValidationRule;
use crate::validation::rules::visit_spreads;
use std::collections::HashSet;

/// GraphQL spec 5.5.2.1 (Fragment Spread Target Defined): every `...Name`
/// spread must reference a fragment defined in the same document.
pub struct KnownFragmentsRule;

impl ValidationRule for KnownFragmentsRule {
    fn name(&self) -> &'static str {
        "known-fragments"
    }

    fn validate(&self, _schema: &Schema, document: &Document) -> Vec<ValidationError> {
        let defined: HashSet<&str> = document
            .fragments()
            .map(|frag| frag.name.as_str())
            .collect();

        let mut errors = vec![];
        let mut check_spread = |spread: &ast::query::FragmentSpread| {
            if !defined.contains(spread.fragment_name.as_str()) {
                errors.push(ValidationError::new(
                    "known-fragments",
                    format!(
                        "Unknown fragment \"{}\".",
                        spread.fragment_name,
                    ),
                    vec![document.position(&spread.position)],
                ));
            }
        };

        for op in document.operations() {
            visit_spreads(ast::query::operation_selection_set(op), &mut check_spread);
        }
        for frag in document.fragments() {
            visit_spreads(&frag.selection_set, &mut check_spread);
        }

        errors
    }
}

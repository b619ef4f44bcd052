mod executable_definitions;
mod field_selections;
mod fragment_cycles;
mod known_fragments;
mod lone_anonymous_operation;
mod operation_name_uniqueness;

pub use executable_definitions::ExecutableDefinitionsRule;
pub use field_selections::FieldSelectionsRule;
pub use fragment_cycles::FragmentCyclesRule;
pub use known_fragments::KnownFragmentsRule;
pub use lone_anonymous_operation::LoneAnonymousOperationRule;
pub use operation_name_uniqueness::OperationNameUniquenessRule;

use crate::ast;

/// Invoke `visit` for every fragment spread reachable within `selection_set`,
/// without following the spreads into their fragment definitions.
pub(crate) fn visit_spreads<'doc>(
    selection_set: &'doc ast::query::SelectionSet,
    visit: &mut impl FnMut(&'doc ast::query::FragmentSpread),
) {
    for selection in &selection_set.items {
        match selection {
            graphql_parser::query::Selection::Field(field) => {
                visit_spreads(&field.selection_set, visit);
            },
            graphql_parser::query::Selection::InlineFragment(inline) => {
                visit_spreads(&inline.selection_set, visit);
            },
            graphql_parser::query::Selection::FragmentSpread(spread) => {
                visit(spread);
            },
        }
    }
}

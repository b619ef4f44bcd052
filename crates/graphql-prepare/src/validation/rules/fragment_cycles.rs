use crate::ast;
use crate::document::Document;
use crate::schema::Schema;
use crate::validation::ValidationError;
use crate::validation::ValidationRule;
use crate::validation::rules::visit_spreads;
use std::collections::HashMap;
use std::collections::HashSet;

/// GraphQL spec 5.5.2.2 (Fragments Must Not Form Cycles): the graph of
/// fragment spreads must be acyclic, including trivial self-spreads
/// (`fragment F on T { ...F }`).
///
/// Selection graphs over an acyclic type graph can still recurse through
/// spreads; rejecting cycles here is what lets the preparation walk splice
/// fragments without termination checks.
pub struct FragmentCyclesRule;

impl ValidationRule for FragmentCyclesRule {
    fn name(&self) -> &'static str {
        "fragment-cycles"
    }

    fn validate(&self, _schema: &Schema, document: &Document) -> Vec<ValidationError> {
        let fragments: HashMap<&str, &ast::query::FragmentDefinition> = document
            .fragments()
            .map(|frag| (frag.name.as_str(), frag))
            .collect();

        let mut errors = vec![];
        let mut fully_visited: HashSet<&str> = HashSet::new();
        for frag in document.fragments() {
            let mut path: Vec<&str> = vec![];
            detect_cycles(
                document,
                &fragments,
                frag,
                &mut path,
                &mut fully_visited,
                &mut errors,
            );
        }
        errors
    }
}

fn detect_cycles<'doc>(
    document: &Document,
    fragments: &HashMap<&'doc str, &'doc ast::query::FragmentDefinition>,
    frag: &'doc ast::query::FragmentDefinition,
    path: &mut Vec<&'doc str>,
    fully_visited: &mut HashSet<&'doc str>,
    errors: &mut Vec<ValidationError>,
) {
    if fully_visited.contains(frag.name.as_str()) {
        return;
    }
    path.push(frag.name.as_str());

    let mut spreads: Vec<&ast::query::FragmentSpread> = vec![];
    visit_spreads(&frag.selection_set, &mut |spread| spreads.push(spread));

    for spread in spreads {
        let spread_name = spread.fragment_name.as_str();
        if path.contains(&spread_name) {
            errors.push(ValidationError::new(
                "fragment-cycles",
                format!(
                    "Cannot spread fragment \"{spread_name}\" within itself \
                    via {}.",
                    path.join(" -> "),
                ),
                vec![document.position(&spread.position)],
            ));
            continue;
        }

        // Unknown spread targets are reported by the known-fragments rule.
        if let Some(next) = fragments.get(spread_name) {
            detect_cycles(document, fragments, next, path, fully_visited, errors);
        }
    }

    path.pop();
    fully_visited.insert(frag.name.as_str());
}

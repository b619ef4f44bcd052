use crate::ast;
use crate::document::Document;
use crate::schema::GraphQLType;
use crate::schema::Schema;
use crate::validation::ValidationError;
use crate::validation::ValidationRule;
use std::collections::HashMap;
use std::collections::HashSet;

const RULE_NAME: &str = "field-selections";

/// Field-level document checks (GraphQL spec 5.3.1, 5.3.3, 5.5.1.3, 5.5.2.3):
/// every selected field must be defined on its parent composite type, leaf
/// fields carry no sub-selections, composite fields require one, fragment
/// type conditions must name known composite types, and fragments may only be
/// spread where their condition shares at least one possible concrete type
/// with the surrounding selection.
///
/// Also rejects operations whose root operation type the schema does not
/// define (e.g. a `mutation` against a query-only schema).
pub struct FieldSelectionsRule;

impl ValidationRule for FieldSelectionsRule {
    fn name(&self) -> &'static str {
        RULE_NAME
    }

    fn validate(&self, schema: &Schema, document: &Document) -> Vec<ValidationError> {
        let fragments: HashMap<&str, &ast::query::FragmentDefinition> = document
            .fragments()
            .map(|frag| (frag.name.as_str(), frag))
            .collect();

        let mut walker = SelectionWalker {
            document,
            errors: vec![],
            fragments,
            schema,
        };

        for op in document.operations() {
            let root_type_name = match ast::query::operation_kind_name(op) {
                "mutation" => schema.mutation_type().map(|t| t.name().to_string()),
                "subscription" => schema.subscription_type().map(|t| t.name().to_string()),
                _ => Some(schema.query_type().name().to_string()),
            };

            match root_type_name {
                Some(name) => {
                    let root_type = schema
                        .type_named(&name)
                        .expect("root operation type is defined");
                    walker.walk(root_type, ast::query::operation_selection_set(op));
                },
                None => walker.errors.push(ValidationError::new(
                    RULE_NAME,
                    format!(
                        "The schema does not define a {} root operation type.",
                        ast::query::operation_kind_name(op),
                    ),
                    vec![document.position(&ast::query::operation_position(op))],
                )),
            }
        }

        // Fragment bodies are validated once against their own type
        // condition; spread sites only check spread possibility.
        for frag in document.fragments() {
            let graphql_parser::query::TypeCondition::On(cond_name) = &frag.type_condition;
            if let Some(cond_type) = walker.composite_condition_type(
                cond_name,
                &frag.position,
            ) {
                walker.walk(cond_type, &frag.selection_set);
            }
        }

        walker.errors
    }
}

struct SelectionWalker<'doc, 'schema> {
    document: &'doc Document,
    errors: Vec<ValidationError>,
    fragments: HashMap<&'doc str, &'doc ast::query::FragmentDefinition>,
    schema: &'schema Schema,
}
impl<'doc, 'schema> SelectionWalker<'doc, 'schema> {
    fn walk(
        &mut self,
        parent_type: &'schema GraphQLType,
        selection_set: &'doc ast::query::SelectionSet,
    ) {
        for selection in &selection_set.items {
            match selection {
                graphql_parser::query::Selection::Field(field) =>
                    self.check_field(parent_type, field),

                graphql_parser::query::Selection::InlineFragment(inline) => {
                    let cond_type = match &inline.type_condition {
                        Some(graphql_parser::query::TypeCondition::On(name)) => {
                            match self.composite_condition_type(name, &inline.position) {
                                Some(cond_type) => cond_type,
                                None => continue,
                            }
                        },
                        None => parent_type,
                    };
                    self.check_spread_possible(parent_type, cond_type, &inline.position);
                    self.walk(cond_type, &inline.selection_set);
                },

                graphql_parser::query::Selection::FragmentSpread(spread) => {
                    // Unknown targets are the known-fragments rule's concern;
                    // bodies are walked from the fragment definition.
                    let Some(frag) = self.fragments.get(spread.fragment_name.as_str())
                    else {
                        continue;
                    };
                    let graphql_parser::query::TypeCondition::On(cond_name) =
                        &frag.type_condition;
                    if let Some(cond_type) = self.schema.type_named(cond_name)
                        && cond_type.is_composite()
                    {
                        self.check_spread_possible(parent_type, cond_type, &spread.position);
                    }
                },
            }
        }
    }

    fn check_field(
        &mut self,
        parent_type: &'schema GraphQLType,
        field: &'doc ast::query::Field,
    ) {
        // Introspection fields (`__typename`, `__schema`, `__type`) are
        // resolved by the executor and exempt from schema field maps.
        if field.name.starts_with("__") {
            return;
        }

        let Some(parent_fields) = parent_type.fields() else {
            self.errors.push(ValidationError::new(
                RULE_NAME,
                format!(
                    "Cannot select field \"{}\" directly on union type \
                    \"{}\"; use a fragment with a type condition.",
                    field.name,
                    parent_type.name(),
                ),
                vec![self.document.position(&field.position)],
            ));
            return;
        };

        let Some(field_def) = parent_fields.get(&field.name) else {
            self.errors.push(ValidationError::new(
                RULE_NAME,
                format!(
                    "Cannot query field \"{}\" on type \"{}\".",
                    field.name,
                    parent_type.name(),
                ),
                vec![self.document.position(&field.position)],
            ));
            return;
        };

        let result_type_name = field_def.type_annotation().innermost_named_type();
        let Some(result_type) = self.schema.type_named(result_type_name) else {
            // A dangling field type is a schema defect, not a document
            // defect; the snapshot is trusted here.
            return;
        };

        if result_type.is_leaf() && !field.selection_set.items.is_empty() {
            self.errors.push(ValidationError::new(
                RULE_NAME,
                format!(
                    "Field \"{}\" must not have a selection since type \
                    \"{result_type_name}\" has no subfields.",
                    field.name,
                ),
                vec![self.document.position(&field.position)],
            ));
        } else if result_type.is_composite() {
            if field.selection_set.items.is_empty() {
                self.errors.push(ValidationError::new(
                    RULE_NAME,
                    format!(
                        "Field \"{}\" of type \"{result_type_name}\" must \
                        have a selection of subfields.",
                        field.name,
                    ),
                    vec![self.document.position(&field.position)],
                ));
            } else {
                self.walk(result_type, &field.selection_set);
            }
        }
    }

    fn composite_condition_type(
        &mut self,
        cond_name: &str,
        pos: &ast::Pos,
    ) -> Option<&'schema GraphQLType> {
        match self.schema.type_named(cond_name) {
            None => {
                self.errors.push(ValidationError::new(
                    RULE_NAME,
                    format!("Unknown type \"{cond_name}\" in fragment type condition."),
                    vec![self.document.position(pos)],
                ));
                None
            },
            Some(cond_type) if !cond_type.is_composite() => {
                self.errors.push(ValidationError::new(
                    RULE_NAME,
                    format!(
                        "Fragments cannot be conditioned on {} type \
                        \"{cond_name}\".",
                        cond_type.kind_name(),
                    ),
                    vec![self.document.position(pos)],
                ));
                None
            },
            Some(cond_type) => Some(cond_type),
        }
    }

    fn check_spread_possible(
        &mut self,
        parent_type: &'schema GraphQLType,
        cond_type: &'schema GraphQLType,
        pos: &ast::Pos,
    ) {
        let parent_possible: HashSet<&str> = self.schema
            .possible_object_types(parent_type)
            .iter()
            .map(|obj| obj.name())
            .collect();
        let overlaps = self.schema
            .possible_object_types(cond_type)
            .iter()
            .any(|obj| parent_possible.contains(obj.name()));

        if !overlaps {
            self.errors.push(ValidationError::new(
                RULE_NAME,
                format!(
                    "Fragment on type \"{}\" can never apply within a \
                    selection on type \"{}\".",
                    cond_type.name(),
                    parent_type.name(),
                ),
                vec![self.document.position(pos)],
            ));
        }
    }
}

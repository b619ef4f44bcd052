use crate::ast;
use crate::prepare::FieldVisibility;
use crate::prepare::PrepareError;
use crate::prepare::VisibilityDirective;
use crate::schema::Field;
use crate::schema::ObjectType;
use crate::schema::Schema;
use indexmap::IndexMap;
use smallvec::SmallVec;
use std::collections::HashMap;

/// All occurrences of one response key gathered for one concrete type,
/// before they are turned into a single
/// [`PreparedSelection`](crate::prepare::PreparedSelection).
pub(crate) struct CollectedField<'doc, 'schema> {
    /// The first syntactic occurrence. Its alias and arguments win.
    pub(crate) field: &'doc ast::query::Field,
    pub(crate) field_def: Option<&'schema Field>,
    /// The nested selection-set nodes of every occurrence, to be merged
    /// recursively.
    pub(crate) nested: SmallVec<[&'doc ast::query::SelectionSet; 2]>,
    pub(crate) visibilities: SmallVec<[FieldVisibility; 2]>,
}

/// Flattens a group of selection-set nodes into the fields that apply to one
/// concrete object type.
///
/// Fragment spreads and inline fragments are spliced in place when their
/// type condition is compatible with the concrete type and skipped entirely
/// otherwise, so the output never contains fragment boundaries. Occurrences
/// sharing a response key are merged in first-occurrence order.
pub(crate) struct FieldCollector<'doc, 'schema, 'a> {
    fragments: &'a HashMap<&'doc str, &'doc ast::query::FragmentDefinition>,
    schema: &'schema Schema,
}

impl<'doc, 'schema, 'a> FieldCollector<'doc, 'schema, 'a> {
    pub(crate) fn new(
        schema: &'schema Schema,
        fragments: &'a HashMap<&'doc str, &'doc ast::query::FragmentDefinition>,
    ) -> Self {
        FieldCollector {
            fragments,
            schema,
        }
    }

    pub(crate) fn collect(
        &self,
        concrete_type: &'schema ObjectType,
        nodes: &[&'doc ast::query::SelectionSet],
    ) -> Result<
        IndexMap<&'doc str, CollectedField<'doc, 'schema>>,
        PrepareError,
    > {
        let mut collected = IndexMap::new();
        for node in nodes {
            self.collect_into(concrete_type, node, &[], &mut collected)?;
        }
        Ok(collected)
    }

    fn collect_into(
        &self,
        concrete_type: &'schema ObjectType,
        node: &'doc ast::query::SelectionSet,
        inherited: &[FieldVisibility],
        collected: &mut IndexMap<&'doc str, CollectedField<'doc, 'schema>>,
    ) -> Result<(), PrepareError> {
        for selection in &node.items {
            match selection {
                ast::query::Selection::Field(field) => {
                    let Some(visibilities) =
                        directive_visibilities(&field.directives, inherited)
                    else {
                        continue;
                    };
                    self.collect_field(
                        concrete_type,
                        field,
                        visibilities,
                        collected,
                    )?;
                },

                ast::query::Selection::InlineFragment(inline) => {
                    let Some(visibilities) =
                        directive_visibilities(&inline.directives, inherited)
                    else {
                        continue;
                    };
                    let condition = inline.type_condition.as_ref()
                        .map(|ast::query::TypeCondition::On(name)| name.as_str());
                    if self.condition_applies(concrete_type, condition) {
                        self.collect_into(
                            concrete_type,
                            &inline.selection_set,
                            &visibilities,
                            collected,
                        )?;
                    }
                },

                ast::query::Selection::FragmentSpread(spread) => {
                    let Some(visibilities) =
                        directive_visibilities(&spread.directives, inherited)
                    else {
                        continue;
                    };
                    let fragment = self.fragments
                        .get(spread.fragment_name.as_str())
                        .expect("collection runs only on validated documents");
                    let ast::query::TypeCondition::On(condition) =
                        &fragment.type_condition;
                    if self.condition_applies(
                        concrete_type,
                        Some(condition.as_str()),
                    ) {
                        self.collect_into(
                            concrete_type,
                            &fragment.selection_set,
                            &visibilities,
                            collected,
                        )?;
                    }
                },
            }
        }
        Ok(())
    }

    fn collect_field(
        &self,
        concrete_type: &'schema ObjectType,
        field: &'doc ast::query::Field,
        visibilities: SmallVec<[FieldVisibility; 2]>,
        collected: &mut IndexMap<&'doc str, CollectedField<'doc, 'schema>>,
    ) -> Result<(), PrepareError> {
        let response_key = field.alias.as_deref()
            .unwrap_or(field.name.as_str());
        let nested_node = (!field.selection_set.items.is_empty())
            .then_some(&field.selection_set);

        if let Some(existing) = collected.get_mut(response_key) {
            // Occurrences merging under one response key must name the same
            // field on this concrete type, or their nested sets could not
            // be compiled under a single result type.
            if existing.field.name != field.name {
                return Err(PrepareError::FieldConflict {
                    first_field: existing.field.name.clone(),
                    response_key: response_key.to_string(),
                    second_field: field.name.clone(),
                    type_name: concrete_type.name().to_string(),
                });
            }
            if let Some(nested) = nested_node {
                existing.nested.push(nested);
            }
            existing.visibilities.extend(visibilities);
            return Ok(());
        }

        let field_def = concrete_type.field(&field.name);
        debug_assert!(
            field_def.is_some() || field.name.starts_with("__"),
            "collection runs only on validated documents",
        );
        collected.insert(response_key, CollectedField {
            field,
            field_def,
            nested: nested_node.into_iter().collect(),
            visibilities,
        });
        Ok(())
    }

    fn condition_applies(
        &self,
        concrete_type: &'schema ObjectType,
        condition: Option<&str>,
    ) -> bool {
        let Some(condition) = condition else {
            // `... { a b }` inherits the surrounding type context.
            return true;
        };
        let Some(condition_type) = self.schema.type_named(condition) else {
            return false;
        };
        self.schema.is_possible_type(concrete_type, condition_type)
    }
}

/// Fold the `@skip`/`@include` directives of one occurrence into its
/// visibility list.
///
/// Returns `None` when a constant condition excludes the occurrence
/// outright. Constant conditions that keep the occurrence are dropped;
/// variable conditions append a [`FieldVisibility`] to the inherited list.
fn directive_visibilities(
    directives: &[ast::query::Directive],
    inherited: &[FieldVisibility],
) -> Option<SmallVec<[FieldVisibility; 2]>> {
    let mut visibilities: SmallVec<[FieldVisibility; 2]> =
        inherited.iter().cloned().collect();
    for directive in directives {
        let kind = match directive.name.as_str() {
            "include" => VisibilityDirective::Include,
            "skip" => VisibilityDirective::Skip,
            _ => continue,
        };
        let condition = directive.arguments.iter()
            .find(|(name, _)| name == "if")
            .map(|(_, value)| value);
        match condition {
            Some(ast::query::Value::Boolean(flag)) => {
                let excluded = match kind {
                    VisibilityDirective::Include => !*flag,
                    VisibilityDirective::Skip => *flag,
                };
                if excluded {
                    return None;
                }
            },

            Some(ast::query::Value::Variable(var_name)) =>
                visibilities.push(FieldVisibility::new(
                    kind,
                    var_name.clone(),
                )),

            // A missing or malformed `if` argument is an input error the
            // executor reports; it does not change visibility here.
            _ => {},
        }
    }
    Some(visibilities)
}

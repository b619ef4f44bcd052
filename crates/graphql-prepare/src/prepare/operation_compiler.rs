use crate::ast;
use crate::document::Document;
use crate::prepare::collect::FieldCollector;
use crate::prepare::PreparedArgumentMap;
use crate::prepare::PreparedOperation;
use crate::prepare::PreparedSelection;
use crate::prepare::PreparedSelectionList;
use crate::prepare::PreparedSelectionSet;
use crate::prepare::prepared_selection_set::SelectionSetId;
use crate::schema::GraphQLType;
use crate::schema::ObjectType;
use crate::schema::Schema;
use crate::validation::DocumentValidator;
use crate::validation::ValidationResult;
use indexmap::IndexMap;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Resource limits applied while compiling an operation. Both bound work
/// done before a single resolver runs, so hostile documents fail fast.
#[derive(Clone, Debug)]
pub struct PrepareOptions {
    /// Maximum number of selections in one merged selection list.
    pub max_breadth: usize,
    /// Maximum field-nesting depth, root selections counting as depth 1.
    pub max_depth: usize,
}

impl Default for PrepareOptions {
    fn default() -> Self {
        PrepareOptions {
            max_breadth: 2048,
            max_depth: 64,
        }
    }
}

#[derive(Clone, Debug, Error)]
pub enum PrepareError {
    #[error(
        "a selection list grew to {breadth} selections, exceeding the \
        configured maximum of {limit}"
    )]
    BreadthLimitExceeded {
        breadth: usize,
        limit: usize,
    },

    #[error("selection depth exceeds the configured maximum of {limit}")]
    DepthLimitExceeded {
        limit: usize,
    },

    #[error(
        "fields `{first_field}` and `{second_field}` cannot be merged under \
        the response key `{response_key}` on type `{type_name}`"
    )]
    FieldConflict {
        first_field: String,
        response_key: String,
        second_field: String,
        type_name: String,
    },

    #[error(
        "the document defines {operation_count} operations; pass an \
        operation name to select one"
    )]
    OperationNameRequired {
        operation_count: usize,
    },

    #[error("{}", match operation_name {
        Some(name) => format!("no operation named `{name}` in the document"),
        None => "the document defines no operations".to_string(),
    })]
    OperationNotFound {
        operation_name: Option<String>,
    },

    #[error(
        "the schema does not define a {operation_kind} root operation type"
    )]
    UndefinedRootType {
        operation_kind: &'static str,
    },

    #[error("the document failed validation:\n{0}")]
    Validation(ValidationResult),
}

/// Validate `document` and compile one of its operations into a
/// [`PreparedOperation`].
///
/// `operation_name` selects among multiple operations; pass `None` for
/// single-operation documents. Validation always runs first, so a plan is
/// only ever built from a document every registered rule accepted.
pub fn prepare<'doc, 'schema>(
    schema: &'schema Schema,
    document: &'doc Document,
    operation_name: Option<&str>,
    options: &PrepareOptions,
) -> Result<PreparedOperation<'doc, 'schema>, PrepareError> {
    let validation = DocumentValidator::new().validate(schema, document);
    if validation.has_errors() {
        return Err(PrepareError::Validation(validation));
    }

    let operation = select_operation(document, operation_name)?;
    OperationCompiler::new(schema, document, options)
        .compile(operation)
}

fn select_operation<'doc>(
    document: &'doc Document,
    operation_name: Option<&str>,
) -> Result<&'doc ast::query::OperationDefinition, PrepareError> {
    let mut operations = document.operations();
    match operation_name {
        Some(name) =>
            operations
                .find(|op| ast::query::operation_name(op) == Some(name))
                .ok_or_else(|| PrepareError::OperationNotFound {
                    operation_name: Some(name.to_string()),
                }),

        None => {
            let Some(first) = operations.next() else {
                return Err(PrepareError::OperationNotFound {
                    operation_name: None,
                });
            };
            let remaining = operations.count();
            if remaining > 0 {
                return Err(PrepareError::OperationNameRequired {
                    operation_count: remaining + 1,
                });
            }
            Ok(first)
        },
    }
}

// Memoization key for a merged selection-set build: the contributing nodes
// plus the declared parent type the group is being compiled under.
type GroupKey<'schema> = (SmallVec<[SelectionSetId; 2]>, &'schema str);

struct OperationCompiler<'doc, 'schema, 'opts> {
    document: &'doc Document,
    fragments: HashMap<&'doc str, &'doc ast::query::FragmentDefinition>,
    groups: HashMap<
        GroupKey<'schema>,
        Arc<PreparedSelectionSet<'doc, 'schema>>,
    >,
    options: &'opts PrepareOptions,
    schema: &'schema Schema,
    selection_sets:
        HashMap<SelectionSetId, Arc<PreparedSelectionSet<'doc, 'schema>>>,
}

impl<'doc, 'schema, 'opts> OperationCompiler<'doc, 'schema, 'opts> {
    fn new(
        schema: &'schema Schema,
        document: &'doc Document,
        options: &'opts PrepareOptions,
    ) -> Self {
        OperationCompiler {
            document,
            fragments: document.fragments()
                .map(|fragment| (fragment.name.as_str(), fragment))
                .collect(),
            groups: HashMap::new(),
            options,
            schema,
            selection_sets: HashMap::new(),
        }
    }

    fn compile(
        mut self,
        operation: &'doc ast::query::OperationDefinition,
    ) -> Result<PreparedOperation<'doc, 'schema>, PrepareError> {
        let operation_kind = ast::query::operation_kind_name(operation);
        let root_type = match operation_kind {
            "mutation" => self.schema.mutation_type(),
            "subscription" => self.schema.subscription_type(),
            _ => Some(self.schema.query_type()),
        }.ok_or(PrepareError::UndefinedRootType {
            operation_kind,
        })?;
        let root_declared_type = self.schema
            .type_named(root_type.name())
            .expect("root operation types are defined in the snapshot");

        let root_node = ast::query::operation_selection_set(operation);
        let root_selection_set = self.build_group(
            SmallVec::from_slice(&[root_node]),
            root_declared_type,
            1,
        )?;

        Ok(PreparedOperation::new(
            operation,
            self.document,
            root_selection_set,
            root_type,
            self.selection_sets,
        ))
    }

    /// Build (or reuse) the prepared set for a group of selection-set nodes
    /// compiled under one declared parent type.
    ///
    /// Groups with more than one node come from response-key merging: every
    /// occurrence's nested set contributes, and every contributing node is
    /// registered in the lookup table pointing at the shared result.
    fn build_group(
        &mut self,
        nodes: SmallVec<[&'doc ast::query::SelectionSet; 2]>,
        declared_type: &'schema GraphQLType,
        depth: usize,
    ) -> Result<Arc<PreparedSelectionSet<'doc, 'schema>>, PrepareError> {
        if depth > self.options.max_depth {
            return Err(PrepareError::DepthLimitExceeded {
                limit: self.options.max_depth,
            });
        }

        let key: GroupKey<'schema> = (
            nodes.iter().map(|node| SelectionSetId::of(node)).collect(),
            declared_type.name(),
        );
        if let Some(existing) = self.groups.get(&key) {
            return Ok(existing.clone());
        }

        let possible_types = self.schema.possible_object_types(declared_type);
        let mut by_type = IndexMap::with_capacity(possible_types.len());
        for object_type in possible_types.iter().copied() {
            let list = self.build_list(object_type, &nodes, depth)?;
            by_type.insert(object_type.name(), list);
        }

        let set = Arc::new(PreparedSelectionSet::new(
            by_type,
            possible_types,
            nodes.clone(),
        ));
        self.groups.insert(key, set.clone());
        for node in &nodes {
            self.selection_sets
                .entry(SelectionSetId::of(node))
                .or_insert_with(|| set.clone());
        }
        Ok(set)
    }

    fn build_list(
        &mut self,
        object_type: &'schema ObjectType,
        nodes: &[&'doc ast::query::SelectionSet],
        depth: usize,
    ) -> Result<PreparedSelectionList<'doc, 'schema>, PrepareError> {
        let collected = FieldCollector::new(self.schema, &self.fragments)
            .collect(object_type, nodes)?;
        if collected.len() > self.options.max_breadth {
            return Err(PrepareError::BreadthLimitExceeded {
                breadth: collected.len(),
                limit: self.options.max_breadth,
            });
        }

        let mut selections = Vec::with_capacity(collected.len());
        for (_response_key, entry) in collected {
            let nested = match entry.field_def {
                Some(field_def) if !entry.nested.is_empty() => {
                    let result_type = self.schema
                        .type_named(
                            field_def.type_annotation().innermost_named_type()
                        )
                        .expect("field result types are defined in the snapshot");
                    result_type.is_composite()
                        .then(|| self.build_group(
                            entry.nested.clone(),
                            result_type,
                            depth + 1,
                        ))
                        .transpose()?
                },

                // Introspection subtrees pass through unprepared; the
                // executor walks the raw syntax node instead.
                _ => None,
            };

            let location =
                self.document.position(&entry.field.position);
            let arguments = match entry.field_def {
                Some(field_def) => PreparedArgumentMap::prepare(
                    self.schema,
                    entry.field,
                    field_def,
                    location,
                ),
                None => PreparedArgumentMap::empty(
                    entry.field.name.clone(),
                    location,
                ),
            };

            selections.push(PreparedSelection::new(
                arguments,
                entry.field,
                entry.field_def,
                nested,
                entry.visibilities,
            ));
        }
        Ok(PreparedSelectionList::new(selections))
    }
}

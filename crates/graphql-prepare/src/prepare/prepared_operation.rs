use crate::ast;
use crate::document::Document;
use crate::prepare::PreparedSelection;
use crate::prepare::PreparedSelectionList;
use crate::prepare::PreparedSelectionSet;
use crate::prepare::prepared_selection_set::SelectionSetId;
use crate::prepare::VisibilityDirective;
use crate::schema::ObjectType;
use crate::value::write_literal;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Arc;

/// A fully prepared operation: the immutable execution plan for one
/// operation of one document against one schema.
///
/// Borrows the document and schema it was prepared from and is safe to share
/// across threads; all request-varying state (variable values, coerced
/// arguments) lives outside it.
#[derive(Debug)]
pub struct PreparedOperation<'doc, 'schema> {
    definition: &'doc ast::query::OperationDefinition,
    document: &'doc Document,
    empty_selections: PreparedSelectionList<'doc, 'schema>,
    id: String,
    name: Option<String>,
    root_selection_set: Arc<PreparedSelectionSet<'doc, 'schema>>,
    root_type: &'schema ObjectType,
    selection_sets:
        HashMap<SelectionSetId, Arc<PreparedSelectionSet<'doc, 'schema>>>,
}

impl<'doc, 'schema> PreparedOperation<'doc, 'schema> {
    pub(crate) fn new(
        definition: &'doc ast::query::OperationDefinition,
        document: &'doc Document,
        root_selection_set: Arc<PreparedSelectionSet<'doc, 'schema>>,
        root_type: &'schema ObjectType,
        selection_sets: HashMap<
            SelectionSetId,
            Arc<PreparedSelectionSet<'doc, 'schema>>,
        >,
    ) -> Self {
        let mut operation = PreparedOperation {
            definition,
            document,
            empty_selections: PreparedSelectionList::empty(),
            id: String::new(),
            name: ast::query::operation_name(definition)
                .map(str::to_string),
            root_selection_set,
            root_type,
            selection_sets,
        };
        operation.id = canonical_id(&operation.print());
        operation
    }

    pub fn definition(&self) -> &'doc ast::query::OperationDefinition {
        self.definition
    }

    pub fn document(&self) -> &'doc Document {
        self.document
    }

    /// A stable identifier for the plan: a hash of the canonical printed
    /// form, so equivalent operations (modulo formatting, fragment layout,
    /// and constant-condition folding) share an id.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn operation_kind_name(&self) -> &'static str {
        ast::query::operation_kind_name(self.definition)
    }

    /// How many executor tasks this plan suggests running. Always 1:
    /// partitioning heuristics belong to the executor.
    pub fn proposed_task_count(&self) -> usize {
        1
    }

    pub fn root_selection_set(
        &self,
    ) -> &Arc<PreparedSelectionSet<'doc, 'schema>> {
        &self.root_selection_set
    }

    pub fn root_type(&self) -> &'schema ObjectType {
        self.root_type
    }

    /// The selections to execute at the operation root.
    pub fn get_root_selections(
        &self,
    ) -> &PreparedSelectionList<'doc, 'schema> {
        self.root_selection_set
            .selections_for(self.root_type)
            .unwrap_or(&self.empty_selections)
    }

    /// The selections prepared for `node` when the surrounding value
    /// resolves to `type_context`.
    ///
    /// A node that was merged into a sibling resolves to the shared merged
    /// set. Unknown nodes and type contexts resolve to an empty list rather
    /// than failing, so a confused caller degrades to producing no output
    /// for the lookup instead of poisoning the whole execution.
    pub fn get_selections(
        &self,
        node: &ast::query::SelectionSet,
        type_context: &ObjectType,
    ) -> &PreparedSelectionList<'doc, 'schema> {
        self.selection_sets
            .get(&SelectionSetId::of(node))
            .and_then(|set| set.selections_for(type_context))
            .unwrap_or(&self.empty_selections)
    }

    /// Render the plan back into canonical, re-parseable GraphQL.
    ///
    /// The output is deterministic for a given plan and stable under
    /// re-preparation: parsing and preparing the printed text yields a plan
    /// that prints byte-identically. Fragments are gone (spliced), constant
    /// `@skip`/`@include` conditions are gone (folded), implicit defaulted
    /// arguments are omitted, and every selection set is spelled as one
    /// inline fragment per concrete possible type.
    pub fn print(&self) -> String {
        let mut out = String::new();
        out.push_str(self.operation_kind_name());
        if let Some(name) = &self.name {
            out.push(' ');
            out.push_str(name);
        }

        let variable_definitions =
            ast::query::operation_variable_definitions(self.definition);
        if !variable_definitions.is_empty() {
            out.push('(');
            for (index, var_def) in variable_definitions.iter().enumerate() {
                if index > 0 {
                    out.push_str(", ");
                }
                let _ = write!(out, "${}: ", var_def.name);
                write_variable_type(&mut out, &var_def.var_type);
                if let Some(default) = &var_def.default_value {
                    out.push_str(" = ");
                    let _ = write_literal(&mut out, default);
                }
            }
            out.push(')');
        }

        out.push_str(" {\n");
        print_selection_set(&mut out, &self.root_selection_set, 1);
        out.push_str("}\n");
        out
    }
}

fn canonical_id(printed: &str) -> String {
    use std::hash::Hash;
    use std::hash::Hasher;
    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    printed.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

fn print_selection_set(
    out: &mut String,
    selection_set: &PreparedSelectionSet<'_, '_>,
    depth: usize,
) {
    for (type_name, list) in selection_set.selections_by_type() {
        if list.is_empty() {
            continue;
        }
        indent(out, depth);
        let _ = write!(out, "... on {type_name} {{\n");
        for selection in list {
            print_selection(out, selection, depth + 1);
        }
        indent(out, depth);
        out.push_str("}\n");
    }
}

fn print_selection(
    out: &mut String,
    selection: &PreparedSelection<'_, '_>,
    depth: usize,
) {
    indent(out, depth);
    if let Some(alias) = selection.alias() {
        let _ = write!(out, "{alias}: ");
    }
    out.push_str(selection.field_name());

    let explicit_arguments: Vec<_> = selection.arguments()
        .iter()
        .filter(|arg| !arg.is_implicit())
        .collect();
    if !explicit_arguments.is_empty() {
        out.push('(');
        for (index, argument) in explicit_arguments.iter().enumerate() {
            if index > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{}: ", argument.name());
            if let Some(literal) = argument.literal() {
                let _ = write_literal(out, literal);
            }
        }
        out.push(')');
    }

    for visibility in selection.visibilities() {
        let directive = match visibility.directive() {
            VisibilityDirective::Include => "include",
            VisibilityDirective::Skip => "skip",
        };
        let _ = write!(out, " @{directive}(if: ${})", visibility.variable());
    }

    if let Some(nested) = selection.selection_set() {
        out.push_str(" {\n");
        print_selection_set(out, nested, depth + 1);
        indent(out, depth);
        out.push('}');
    }
    out.push('\n');
}

fn write_variable_type(out: &mut String, var_type: &ast::query::Type) {
    match var_type {
        graphql_parser::query::Type::NamedType(name) =>
            out.push_str(name),

        graphql_parser::query::Type::ListType(inner) => {
            out.push('[');
            write_variable_type(out, inner);
            out.push(']');
        },

        graphql_parser::query::Type::NonNullType(inner) => {
            write_variable_type(out, inner);
            out.push('!');
        },
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

use crate::ast;
use crate::prepare::FieldVisibility;
use crate::prepare::PreparedArgumentMap;
use crate::prepare::PreparedSelectionSet;
use crate::schema::Field;
use smallvec::SmallVec;
use std::sync::Arc;

/// One merged field occurrence in a prepared selection list.
///
/// All syntactic occurrences sharing a response key within a selection set
/// collapse into one [`PreparedSelection`]; their nested selection sets are
/// merged recursively into a single shared [`PreparedSelectionSet`].
#[derive(Debug)]
pub struct PreparedSelection<'doc, 'schema> {
    arguments: PreparedArgumentMap<'schema>,
    field: &'doc ast::query::Field,
    field_def: Option<&'schema Field>,
    selection_set: Option<Arc<PreparedSelectionSet<'doc, 'schema>>>,
    visibilities: SmallVec<[FieldVisibility; 2]>,
}

impl<'doc, 'schema> PreparedSelection<'doc, 'schema> {
    pub(crate) fn new(
        arguments: PreparedArgumentMap<'schema>,
        field: &'doc ast::query::Field,
        field_def: Option<&'schema Field>,
        selection_set: Option<Arc<PreparedSelectionSet<'doc, 'schema>>>,
        visibilities: SmallVec<[FieldVisibility; 2]>,
    ) -> Self {
        PreparedSelection {
            arguments,
            field,
            field_def,
            selection_set,
            visibilities,
        }
    }

    pub fn alias(&self) -> Option<&'doc str> {
        self.field.alias.as_deref()
    }

    pub fn arguments(&self) -> &PreparedArgumentMap<'schema> {
        &self.arguments
    }

    pub fn field_name(&self) -> &'doc str {
        self.field.name.as_str()
    }

    /// The schema definition of the selected field. `None` only for
    /// introspection fields (`__typename` and friends), which pass through
    /// preparation unmodeled.
    pub fn field_def(&self) -> Option<&'schema Field> {
        self.field_def
    }

    /// Whether the field is unconditionally part of every response for its
    /// concrete type: no variable-conditioned `@skip`/`@include` remains.
    pub fn is_final(&self) -> bool {
        self.visibilities.is_empty()
    }

    /// The key this field's value is written under in the response: the
    /// alias when one is present, the field name otherwise.
    pub fn response_key(&self) -> &'doc str {
        self.field.alias.as_deref().unwrap_or(self.field.name.as_str())
    }

    /// The merged nested selection set, for composite-typed fields.
    pub fn selection_set(
        &self,
    ) -> Option<&Arc<PreparedSelectionSet<'doc, 'schema>>> {
        self.selection_set.as_ref()
    }

    /// The first syntactic occurrence this selection was merged from.
    pub fn syntax_node(&self) -> &'doc ast::query::Field {
        self.field
    }

    /// The variable-conditioned visibility entries accumulated from every
    /// path this field was reached through. The executor must honor each
    /// one: any combination of condition outcomes is a valid request.
    pub fn visibilities(&self) -> &[FieldVisibility] {
        &self.visibilities
    }
}

/// The prepared selections of one concrete object type within a selection
/// set, in first-occurrence document order.
#[derive(Debug)]
pub struct PreparedSelectionList<'doc, 'schema> {
    is_final: bool,
    selections: Vec<PreparedSelection<'doc, 'schema>>,
}

impl<'doc, 'schema> PreparedSelectionList<'doc, 'schema> {
    pub(crate) fn new(
        selections: Vec<PreparedSelection<'doc, 'schema>>,
    ) -> Self {
        let is_final = selections.iter().all(PreparedSelection::is_final);
        PreparedSelectionList {
            is_final,
            selections,
        }
    }

    pub(crate) fn empty() -> Self {
        PreparedSelectionList {
            is_final: true,
            selections: vec![],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Whether every selection in the list is unconditionally included, so
    /// the executor can skip visibility evaluation for the whole list.
    pub fn is_final(&self) -> bool {
        self.is_final
    }

    pub fn iter(
        &self,
    ) -> std::slice::Iter<'_, PreparedSelection<'doc, 'schema>> {
        self.selections.iter()
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn selections(&self) -> &[PreparedSelection<'doc, 'schema>] {
        &self.selections
    }
}

impl<'a, 'doc, 'schema> IntoIterator for &'a PreparedSelectionList<'doc, 'schema> {
    type Item = &'a PreparedSelection<'doc, 'schema>;
    type IntoIter = std::slice::Iter<'a, PreparedSelection<'doc, 'schema>>;

    fn into_iter(self) -> Self::IntoIter {
        self.selections.iter()
    }
}

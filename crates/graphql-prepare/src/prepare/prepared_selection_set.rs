use crate::ast;
use crate::prepare::PreparedSelectionList;
use crate::schema::ObjectType;
use indexmap::IndexMap;
use smallvec::SmallVec;

/// An opaque identity for a syntactic selection set, used to key prepared
/// selection sets back to the document nodes they were compiled from.
///
/// Identity is by node address within the document's AST, which is stable
/// for the life of the [`Document`](crate::Document) the prepared operation
/// borrows from.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct SelectionSetId(usize);

impl SelectionSetId {
    pub(crate) fn of(node: &ast::query::SelectionSet) -> Self {
        SelectionSetId(std::ptr::from_ref(node) as usize)
    }
}

/// The prepared form of one (possibly merged) selection set: a selection
/// list per concrete object type the surrounding value can resolve to.
#[derive(Debug)]
pub struct PreparedSelectionSet<'doc, 'schema> {
    by_type: IndexMap<&'schema str, PreparedSelectionList<'doc, 'schema>>,
    possible_types: Vec<&'schema ObjectType>,
    syntax_nodes: SmallVec<[&'doc ast::query::SelectionSet; 2]>,
}

impl<'doc, 'schema> PreparedSelectionSet<'doc, 'schema> {
    pub(crate) fn new(
        by_type: IndexMap<&'schema str, PreparedSelectionList<'doc, 'schema>>,
        possible_types: Vec<&'schema ObjectType>,
        syntax_nodes: SmallVec<[&'doc ast::query::SelectionSet; 2]>,
    ) -> Self {
        PreparedSelectionSet {
            by_type,
            possible_types,
            syntax_nodes,
        }
    }

    /// The concrete object types this selection set was prepared for, in
    /// schema declaration order.
    pub fn possible_types(&self) -> &[&'schema ObjectType] {
        &self.possible_types
    }

    /// The selections to execute when the surrounding value resolves to
    /// `object_type`.
    pub fn selections_for(
        &self,
        object_type: &ObjectType,
    ) -> Option<&PreparedSelectionList<'doc, 'schema>> {
        self.by_type.get(object_type.name())
    }

    pub(crate) fn selections_by_type(
        &self,
    ) -> &IndexMap<&'schema str, PreparedSelectionList<'doc, 'schema>> {
        &self.by_type
    }

    /// The first syntactic selection set this prepared set was compiled
    /// from. Merged sets keep every contributing node; see
    /// [`syntax_nodes`](Self::syntax_nodes).
    pub fn syntax_node(&self) -> &'doc ast::query::SelectionSet {
        self.syntax_nodes[0]
    }

    pub fn syntax_nodes(&self) -> &[&'doc ast::query::SelectionSet] {
        &self.syntax_nodes
    }
}

//! Type aliases over the external parser's AST.
//!
//! The parser is an external collaborator: everything in this crate consumes
//! the syntax tree it produces and never re-tokenizes source text. Aliasing
//! the node types here keeps the rest of the crate from naming the parser
//! crate directly.

pub mod query {
    pub use graphql_parser::query::ParseError;

    pub type Definition = graphql_parser::query::Definition<'static, String>;
    pub type Directive = graphql_parser::query::Directive<'static, String>;
    pub type Document = graphql_parser::query::Document<'static, String>;
    pub type Field = graphql_parser::query::Field<'static, String>;
    pub type FragmentDefinition = graphql_parser::query::FragmentDefinition<'static, String>;
    pub type FragmentSpread = graphql_parser::query::FragmentSpread<'static, String>;
    pub type InlineFragment = graphql_parser::query::InlineFragment<'static, String>;
    pub type Mutation = graphql_parser::query::Mutation<'static, String>;
    pub type OperationDefinition = graphql_parser::query::OperationDefinition<'static, String>;
    pub type Query = graphql_parser::query::Query<'static, String>;
    pub type Selection = graphql_parser::query::Selection<'static, String>;
    pub type SelectionSet = graphql_parser::query::SelectionSet<'static, String>;
    pub type Subscription = graphql_parser::query::Subscription<'static, String>;
    pub type Type = graphql_parser::query::Type<'static, String>;
    pub type TypeCondition = graphql_parser::query::TypeCondition<'static, String>;
    pub type Value = graphql_parser::query::Value<'static, String>;
    pub type VariableDefinition = graphql_parser::query::VariableDefinition<'static, String>;

    pub fn parse(content: &str) -> Result<Document, ParseError> {
        graphql_parser::parse_query::<String>(content).map(|doc| doc.into_static())
    }

    /// The operation's name, if it has one. Shorthand-form operations are
    /// always anonymous.
    pub fn operation_name(op: &OperationDefinition) -> Option<&str> {
        match op {
            graphql_parser::query::OperationDefinition::SelectionSet(_) => None,
            graphql_parser::query::OperationDefinition::Query(q) => q.name.as_deref(),
            graphql_parser::query::OperationDefinition::Mutation(m) => m.name.as_deref(),
            graphql_parser::query::OperationDefinition::Subscription(s) => s.name.as_deref(),
        }
    }

    pub fn operation_position(op: &OperationDefinition) -> super::Pos {
        match op {
            graphql_parser::query::OperationDefinition::SelectionSet(ss) => ss.span.0,
            graphql_parser::query::OperationDefinition::Query(q) => q.position,
            graphql_parser::query::OperationDefinition::Mutation(m) => m.position,
            graphql_parser::query::OperationDefinition::Subscription(s) => s.position,
        }
    }

    pub fn operation_selection_set(op: &OperationDefinition) -> &SelectionSet {
        match op {
            graphql_parser::query::OperationDefinition::SelectionSet(ss) => ss,
            graphql_parser::query::OperationDefinition::Query(q) => &q.selection_set,
            graphql_parser::query::OperationDefinition::Mutation(m) => &m.selection_set,
            graphql_parser::query::OperationDefinition::Subscription(s) => &s.selection_set,
        }
    }

    pub fn operation_kind_name(op: &OperationDefinition) -> &'static str {
        match op {
            graphql_parser::query::OperationDefinition::SelectionSet(_)
                | graphql_parser::query::OperationDefinition::Query(_) => "query",
            graphql_parser::query::OperationDefinition::Mutation(_) => "mutation",
            graphql_parser::query::OperationDefinition::Subscription(_) => "subscription",
        }
    }

    pub fn operation_variable_definitions(
        op: &OperationDefinition,
    ) -> &[VariableDefinition] {
        match op {
            graphql_parser::query::OperationDefinition::SelectionSet(_) => &[],
            graphql_parser::query::OperationDefinition::Query(q) => &q.variable_definitions,
            graphql_parser::query::OperationDefinition::Mutation(m) => &m.variable_definitions,
            graphql_parser::query::OperationDefinition::Subscription(s) => &s.variable_definitions,
        }
    }
}

pub mod schema {
    pub use graphql_parser::schema::ParseError;

    pub type Definition = graphql_parser::schema::Definition<'static, String>;
    pub type Document = graphql_parser::schema::Document<'static, String>;
    pub type EnumType = graphql_parser::schema::EnumType<'static, String>;
    pub type Field = graphql_parser::schema::Field<'static, String>;
    pub type InputObjectType = graphql_parser::schema::InputObjectType<'static, String>;
    pub type InputValue = graphql_parser::schema::InputValue<'static, String>;
    pub type InterfaceType = graphql_parser::schema::InterfaceType<'static, String>;
    pub type ObjectType = graphql_parser::schema::ObjectType<'static, String>;
    pub type ScalarType = graphql_parser::schema::ScalarType<'static, String>;
    pub type SchemaDefinition = graphql_parser::schema::SchemaDefinition<'static, String>;
    pub type Type = graphql_parser::schema::Type<'static, String>;
    pub type TypeDefinition = graphql_parser::schema::TypeDefinition<'static, String>;
    pub type UnionType = graphql_parser::schema::UnionType<'static, String>;

    pub fn parse(content: &str) -> Result<Document, ParseError> {
        graphql_parser::parse_schema::<String>(content).map(|doc| doc.into_static())
    }
}

pub type Number = graphql_parser::query::Number;
pub type Pos = graphql_parser::Pos;

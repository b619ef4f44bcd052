use crate::schema::GraphQLType;
use crate::schema::ObjectType;
use crate::schema::SchemaBuilder;
use indexmap::IndexMap;
use std::collections::HashMap;

/// A read-only, pre-validated schema snapshot.
///
/// Exposes exactly what validation and preparation need: type-by-name lookup,
/// root operation types, and the polymorphism queries (`is_possible_type`,
/// `possible_object_types`). Immutable after construction and safe to share
/// across threads without locking.
#[derive(Clone, Debug, PartialEq)]
pub struct Schema {
    pub(crate) mutation_type: Option<String>,
    // Abstract type name -> member/implementer object type names, in schema
    // declaration order.
    pub(crate) possible_types: HashMap<String, Vec<String>>,
    pub(crate) query_type: String,
    pub(crate) subscription_type: Option<String>,
    pub(crate) types: IndexMap<String, GraphQLType>,
}
impl Schema {
    /// Helper that just delegates to [`SchemaBuilder::new()`].
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    pub fn all_types(&self) -> &IndexMap<String, GraphQLType> {
        &self.types
    }

    pub fn type_named(&self, name: &str) -> Option<&GraphQLType> {
        self.types.get(name)
    }

    /// This schema's Query root operation type.
    pub fn query_type(&self) -> &ObjectType {
        self.object_type_named(&self.query_type)
    }

    /// This schema's Mutation root operation type (if one is defined).
    pub fn mutation_type(&self) -> Option<&ObjectType> {
        self.mutation_type
            .as_deref()
            .map(|name| self.object_type_named(name))
    }

    /// This schema's Subscription root operation type (if one is defined).
    pub fn subscription_type(&self) -> Option<&ObjectType> {
        self.subscription_type
            .as_deref()
            .map(|name| self.object_type_named(name))
    }

    /// The concrete object types a value of `graphql_type` can resolve to at
    /// response time: the type itself for objects, implementers for
    /// interfaces, members for unions. Empty for non-composite types.
    pub fn possible_object_types<'schema>(
        &'schema self,
        graphql_type: &'schema GraphQLType,
    ) -> Vec<&'schema ObjectType> {
        match graphql_type {
            GraphQLType::Object(obj_type) => vec![obj_type],

            GraphQLType::Interface(_) | GraphQLType::Union(_) =>
                self.possible_types
                    .get(graphql_type.name())
                    .map(|names| {
                        names.iter()
                            .map(|name| self.object_type_named(name))
                            .collect()
                    })
                    .unwrap_or_default(),

            _ => vec![],
        }
    }

    /// Whether `object_type` is one of the concrete types `abstract_type` can
    /// resolve to. When `abstract_type` is itself an object type this is a
    /// name-equality check.
    pub fn is_possible_type(
        &self,
        object_type: &ObjectType,
        abstract_type: &GraphQLType,
    ) -> bool {
        match abstract_type {
            GraphQLType::Object(other) => other.name == object_type.name,

            GraphQLType::Interface(_) | GraphQLType::Union(_) =>
                self.possible_types
                    .get(abstract_type.name())
                    .is_some_and(|names| names.iter().any(|n| *n == object_type.name)),

            _ => false,
        }
    }

    // Root types and possible-type entries are checked at build time; a
    // missing entry here is a violation of the snapshot's construction
    // invariant.
    fn object_type_named(&self, name: &str) -> &ObjectType {
        self.types
            .get(name)
            .and_then(GraphQLType::as_object)
            .expect("snapshot references only defined object types")
    }
}

mod enum_type;
mod field;
mod graphql_type;
mod input_object_type;
mod interface_type;
mod object_type;
mod scalar_type;
#[allow(clippy::module_inception)]
mod schema;
mod schema_builder;
mod type_annotation;
mod union_type;

pub use enum_type::EnumType;
pub use enum_type::EnumValue;
pub use field::Field;
pub use field::Parameter;
pub use graphql_type::GraphQLType;
pub use input_object_type::InputField;
pub use input_object_type::InputObjectType;
pub use interface_type::InterfaceType;
pub use object_type::ObjectType;
pub use scalar_type::ScalarType;
pub use schema::Schema;
pub use schema_builder::SchemaBuildError;
pub use schema_builder::SchemaBuilder;
pub use type_annotation::ListTypeAnnotation;
pub use type_annotation::NamedTypeAnnotation;
pub use type_annotation::TypeAnnotation;
pub use union_type::UnionType;

use crate::loc;
use crate::schema::EnumType;
use crate::schema::Field;
use crate::schema::InputObjectType;
use crate::schema::InterfaceType;
use crate::schema::ObjectType;
use crate::schema::ScalarType;
use crate::schema::UnionType;
use std::collections::BTreeMap;

/// A named type defined within a [`Schema`](crate::schema::Schema).
#[derive(Clone, Debug, PartialEq)]
pub enum GraphQLType {
    Enum(EnumType),
    InputObject(InputObjectType),
    Interface(InterfaceType),
    Object(ObjectType),
    Scalar(ScalarType),
    Union(UnionType),
}
impl GraphQLType {
    pub fn def_location(&self) -> &loc::SchemaDefLocation {
        match self {
            GraphQLType::Enum(t) => &t.def_location,
            GraphQLType::InputObject(t) => &t.def_location,
            GraphQLType::Interface(t) => &t.def_location,
            GraphQLType::Object(t) => &t.def_location,
            GraphQLType::Scalar(t) => &t.def_location,
            GraphQLType::Union(t) => &t.def_location,
        }
    }

    /// The field map for types that can be selected into (object/interface).
    /// Unions expose no directly selectable fields.
    pub fn fields(&self) -> Option<&BTreeMap<String, Field>> {
        match self {
            GraphQLType::Interface(t) => Some(&t.fields),
            GraphQLType::Object(t) => Some(&t.fields),
            _ => None,
        }
    }

    /// Whether a selection set may appear under this type.
    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            GraphQLType::Interface(_) | GraphQLType::Object(_) | GraphQLType::Union(_),
        )
    }

    /// Whether the type is a response leaf (scalar or enum).
    pub fn is_leaf(&self) -> bool {
        matches!(self, GraphQLType::Enum(_) | GraphQLType::Scalar(_))
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            GraphQLType::Enum(_) => "enum",
            GraphQLType::InputObject(_) => "input object",
            GraphQLType::Interface(_) => "interface",
            GraphQLType::Object(_) => "object",
            GraphQLType::Scalar(_) => "scalar",
            GraphQLType::Union(_) => "union",
        }
    }

    pub fn name(&self) -> &str {
        match self {
            GraphQLType::Enum(t) => t.name.as_str(),
            GraphQLType::InputObject(t) => t.name.as_str(),
            GraphQLType::Interface(t) => t.name.as_str(),
            GraphQLType::Object(t) => t.name.as_str(),
            GraphQLType::Scalar(t) => t.name.as_str(),
            GraphQLType::Union(t) => t.name.as_str(),
        }
    }

    pub fn as_object(&self) -> Option<&ObjectType> {
        match self {
            GraphQLType::Object(obj_type) => Some(obj_type),
            _ => None,
        }
    }
}

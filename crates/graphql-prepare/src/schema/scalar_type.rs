use crate::loc;

/// Information associated with [`GraphQLType::Scalar`](crate::schema::GraphQLType::Scalar).
///
/// The five built-in scalars are represented with a
/// [`loc::SchemaDefLocation::GraphQLBuiltIn`] definition location.
#[derive(Clone, Debug, PartialEq)]
pub struct ScalarType {
    pub(crate) def_location: loc::SchemaDefLocation,
    pub(crate) name: String,
}
impl ScalarType {
    pub fn def_location(&self) -> &loc::SchemaDefLocation {
        &self.def_location
    }

    pub fn is_builtin(&self) -> bool {
        self.def_location == loc::SchemaDefLocation::GraphQLBuiltIn
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

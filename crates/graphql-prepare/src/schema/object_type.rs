use crate::loc;
use crate::schema::Field;
use std::collections::BTreeMap;

/// Information associated with [`GraphQLType::Object`](crate::schema::GraphQLType::Object).
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectType {
    pub(crate) def_location: loc::SchemaDefLocation,
    pub(crate) fields: BTreeMap<String, Field>,
    pub(crate) interfaces: Vec<String>,
    pub(crate) name: String,
}
impl ObjectType {
    pub fn def_location(&self) -> &loc::SchemaDefLocation {
        &self.def_location
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> &BTreeMap<String, Field> {
        &self.fields
    }

    /// Names of the interfaces this object type implements.
    pub fn interfaces(&self) -> &[String] {
        &self.interfaces
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

use crate::loc;
use crate::schema::Field;
use std::collections::BTreeMap;

/// Information associated with [`GraphQLType::Interface`](crate::schema::GraphQLType::Interface).
#[derive(Clone, Debug, PartialEq)]
pub struct InterfaceType {
    pub(crate) def_location: loc::SchemaDefLocation,
    pub(crate) fields: BTreeMap<String, Field>,
    pub(crate) name: String,
}
impl InterfaceType {
    pub fn def_location(&self) -> &loc::SchemaDefLocation {
        &self.def_location
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> &BTreeMap<String, Field> {
        &self.fields
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

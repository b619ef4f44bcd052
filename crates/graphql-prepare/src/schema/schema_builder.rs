use crate::ast;
use crate::loc;
use crate::schema::EnumType;
use crate::schema::EnumValue;
use crate::schema::Field;
use crate::schema::GraphQLType;
use crate::schema::InputField;
use crate::schema::InputObjectType;
use crate::schema::InterfaceType;
use crate::schema::ObjectType;
use crate::schema::Parameter;
use crate::schema::ScalarType;
use crate::schema::Schema;
use crate::schema::TypeAnnotation;
use crate::schema::UnionType;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

type Result<T> = std::result::Result<T, Vec<SchemaBuildError>>;

const BUILTIN_SCALAR_NAMES: [&str; 5] = ["Boolean", "Float", "ID", "Int", "String"];

/// Builds a [`Schema`] snapshot from SDL.
///
/// Schemas are treated as pre-validated collaborators: the builder rejects
/// only what would make the snapshot structurally unusable (duplicate type
/// names, dangling root/interface/union references), not the full SDL
/// validation surface.
#[derive(Clone, Debug)]
pub struct SchemaBuilder {
    mutation_type: Option<String>,
    query_type: Option<String>,
    source_path: Option<PathBuf>,
    subscription_type: Option<String>,
    types: IndexMap<String, GraphQLType>,
}
impl SchemaBuilder {
    pub fn new() -> Self {
        let mut types = IndexMap::new();
        for name in BUILTIN_SCALAR_NAMES {
            types.insert(name.to_string(), GraphQLType::Scalar(ScalarType {
                def_location: loc::SchemaDefLocation::GraphQLBuiltIn,
                name: name.to_string(),
            }));
        }

        Self {
            mutation_type: None,
            query_type: None,
            source_path: None,
            subscription_type: None,
            types,
        }
    }

    pub fn from_file(file_path: impl AsRef<Path>) -> Result<Self> {
        let file_path = file_path.as_ref();
        let content = std::fs::read_to_string(file_path)
            .map_err(|e| vec![SchemaBuildError::SchemaFileReadError(Arc::new(e))])?;
        Self::from_str(content, Some(file_path))
    }

    pub fn from_str(
        content: impl AsRef<str>,
        source_path: Option<&Path>,
    ) -> Result<Self> {
        let ast_doc = ast::schema::parse(content.as_ref())
            .map_err(|e| vec![SchemaBuildError::ParseError(Arc::new(e))])?;
        Self::from_ast(&ast_doc, source_path)
    }

    pub fn from_ast(
        ast_doc: &ast::schema::Document,
        source_path: Option<&Path>,
    ) -> Result<Self> {
        let mut builder = Self::new();
        builder.source_path = source_path.map(|p| p.to_path_buf());

        let mut errors = vec![];
        for def in &ast_doc.definitions {
            match def {
                graphql_parser::schema::Definition::SchemaDefinition(schema_def) => {
                    builder.query_type = schema_def.query.clone();
                    builder.mutation_type = schema_def.mutation.clone();
                    builder.subscription_type = schema_def.subscription.clone();
                },

                graphql_parser::schema::Definition::TypeDefinition(type_def) => {
                    if let Err(e) = builder.add_type_definition(type_def) {
                        errors.push(e);
                    }
                },

                // Custom directive definitions don't participate in
                // validation or preparation; `@skip`/`@include` are modeled
                // directly.
                graphql_parser::schema::Definition::DirectiveDefinition(_) => {},

                graphql_parser::schema::Definition::TypeExtension(_) => {
                    errors.push(SchemaBuildError::TypeExtensionsUnsupported);
                },
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(builder)
    }

    /// Consume the builder to produce an immutable [`Schema`] snapshot.
    pub fn build(self) -> Result<Schema> {
        let mut errors = vec![];

        let query_type = self.resolve_root_type(
            self.query_type.as_deref().unwrap_or("Query"),
            "query",
            &mut errors,
        );
        let mutation_type = self.resolve_optional_root_type(
            self.mutation_type.as_deref(),
            "Mutation",
            "mutation",
            &mut errors,
        );
        let subscription_type = self.resolve_optional_root_type(
            self.subscription_type.as_deref(),
            "Subscription",
            "subscription",
            &mut errors,
        );

        let mut possible_types: HashMap<String, Vec<String>> = HashMap::new();
        for graphql_type in self.types.values() {
            match graphql_type {
                GraphQLType::Object(obj_type) => {
                    for iface_name in &obj_type.interfaces {
                        match self.types.get(iface_name) {
                            Some(GraphQLType::Interface(_)) => {
                                possible_types
                                    .entry(iface_name.clone())
                                    .or_default()
                                    .push(obj_type.name.clone());
                            },
                            _ => errors.push(SchemaBuildError::UndefinedInterface {
                                interface_name: iface_name.clone(),
                                object_name: obj_type.name.clone(),
                            }),
                        }
                    }
                },

                GraphQLType::Union(union_type) => {
                    for member_name in &union_type.members {
                        match self.types.get(member_name) {
                            Some(GraphQLType::Object(_)) => {
                                possible_types
                                    .entry(union_type.name.clone())
                                    .or_default()
                                    .push(member_name.clone());
                            },
                            _ => errors.push(SchemaBuildError::UndefinedUnionMember {
                                member_name: member_name.clone(),
                                union_name: union_type.name.clone(),
                            }),
                        }
                    }
                },

                _ => {},
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Schema {
            mutation_type,
            possible_types,
            query_type: query_type.expect("query root errors were reported above"),
            subscription_type,
            types: self.types,
        })
    }

    fn add_type_definition(
        &mut self,
        type_def: &ast::schema::TypeDefinition,
    ) -> std::result::Result<(), SchemaBuildError> {
        let (name, graphql_type) = match type_def {
            graphql_parser::schema::TypeDefinition::Scalar(t) => (
                &t.name,
                GraphQLType::Scalar(ScalarType {
                    def_location: self.def_location(&t.position),
                    name: t.name.clone(),
                }),
            ),

            graphql_parser::schema::TypeDefinition::Object(t) => (
                &t.name,
                GraphQLType::Object(ObjectType {
                    def_location: self.def_location(&t.position),
                    fields: self.build_fields(&t.fields),
                    interfaces: t.implements_interfaces.clone(),
                    name: t.name.clone(),
                }),
            ),

            graphql_parser::schema::TypeDefinition::Interface(t) => (
                &t.name,
                GraphQLType::Interface(InterfaceType {
                    def_location: self.def_location(&t.position),
                    fields: self.build_fields(&t.fields),
                    name: t.name.clone(),
                }),
            ),

            graphql_parser::schema::TypeDefinition::Union(t) => (
                &t.name,
                GraphQLType::Union(UnionType {
                    def_location: self.def_location(&t.position),
                    members: t.types.clone(),
                    name: t.name.clone(),
                }),
            ),

            graphql_parser::schema::TypeDefinition::Enum(t) => (
                &t.name,
                GraphQLType::Enum(EnumType {
                    def_location: self.def_location(&t.position),
                    name: t.name.clone(),
                    values: t.values.iter().map(|value| (
                        value.name.clone(),
                        EnumValue {
                            def_location: self.def_location(&value.position),
                            name: value.name.clone(),
                        },
                    )).collect(),
                }),
            ),

            graphql_parser::schema::TypeDefinition::InputObject(t) => (
                &t.name,
                GraphQLType::InputObject(InputObjectType {
                    def_location: self.def_location(&t.position),
                    fields: t.fields.iter().map(|input_value| (
                        input_value.name.clone(),
                        InputField {
                            def_location: self.def_location(&input_value.position),
                            default_value: input_value.default_value.clone(),
                            name: input_value.name.clone(),
                            type_annotation: TypeAnnotation::from_ast_type(
                                &input_value.value_type,
                            ),
                        },
                    )).collect(),
                    name: t.name.clone(),
                }),
            ),
        };

        if self.types.contains_key(name) {
            return Err(SchemaBuildError::DuplicateTypeName {
                type_name: name.clone(),
            });
        }
        self.types.insert(name.clone(), graphql_type);
        Ok(())
    }

    fn build_fields(
        &self,
        ast_fields: &[ast::schema::Field],
    ) -> std::collections::BTreeMap<String, Field> {
        ast_fields.iter().map(|ast_field| (
            ast_field.name.clone(),
            Field {
                def_location: self.def_location(&ast_field.position),
                name: ast_field.name.clone(),
                parameters: ast_field.arguments.iter().map(|input_value| Parameter {
                    def_location: self.def_location(&input_value.position),
                    default_value: input_value.default_value.clone(),
                    name: input_value.name.clone(),
                    type_annotation: TypeAnnotation::from_ast_type(
                        &input_value.value_type,
                    ),
                }).collect(),
                type_annotation: TypeAnnotation::from_ast_type(&ast_field.field_type),
            },
        )).collect()
    }

    fn def_location(&self, pos: &ast::Pos) -> loc::SchemaDefLocation {
        loc::SchemaDefLocation::Schema(loc::FilePosition::from_pos(
            self.source_path.as_deref(),
            *pos,
        ))
    }

    fn resolve_root_type(
        &self,
        name: &str,
        operation: &'static str,
        errors: &mut Vec<SchemaBuildError>,
    ) -> Option<String> {
        match self.types.get(name) {
            Some(GraphQLType::Object(_)) => Some(name.to_string()),
            Some(_) => {
                errors.push(SchemaBuildError::NonObjectRootOperationType {
                    operation,
                    type_name: name.to_string(),
                });
                None
            },
            None => {
                errors.push(SchemaBuildError::UndefinedRootOperationType {
                    operation,
                    type_name: name.to_string(),
                });
                None
            },
        }
    }

    // Explicit root names must resolve; the conventional default names are
    // optional roots that only bind when such a type happens to be defined.
    fn resolve_optional_root_type(
        &self,
        explicit_name: Option<&str>,
        default_name: &str,
        operation: &'static str,
        errors: &mut Vec<SchemaBuildError>,
    ) -> Option<String> {
        match explicit_name {
            Some(name) => self.resolve_root_type(name, operation, errors),
            None => match self.types.get(default_name) {
                Some(GraphQLType::Object(_)) => Some(default_name.to_string()),
                _ => None,
            },
        }
    }
}
impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug, Error)]
pub enum SchemaBuildError {
    #[error("Multiple types defined with the name `{type_name}`")]
    DuplicateTypeName {
        type_name: String,
    },

    #[error(
        "The `{type_name}` type is used as the {operation} root operation \
        type but is not an object type"
    )]
    NonObjectRootOperationType {
        operation: &'static str,
        type_name: String,
    },

    #[error("Error parsing schema document: {0}")]
    ParseError(Arc<ast::schema::ParseError>),

    #[error("Failure while trying to read a schema file from disk: {0}")]
    SchemaFileReadError(Arc<std::io::Error>),

    #[error("Type extensions are not supported by this schema snapshot")]
    TypeExtensionsUnsupported,

    #[error(
        "The `{object_name}` type implements `{interface_name}`, but \
        `{interface_name}` is not a defined interface type"
    )]
    UndefinedInterface {
        interface_name: String,
        object_name: String,
    },

    #[error(
        "The `{type_name}` type is used as the {operation} root operation \
        type but is not defined in the schema"
    )]
    UndefinedRootOperationType {
        operation: &'static str,
        type_name: String,
    },

    #[error(
        "The `{union_name}` union includes `{member_name}`, but \
        `{member_name}` is not a defined object type"
    )]
    UndefinedUnionMember {
        member_name: String,
        union_name: String,
    },
}

use crate::ast;
use crate::document::Definition;
use crate::document::Document;
use crate::schema::Schema;
use crate::validation::ValidationError;
use crate::validation::ValidationRule;

/// GraphQL spec 5.1.1 (Executable Definitions): a request document must
/// contain only operations and fragments.
///
/// Single-error short-circuit: the document is rejected as a whole, so only
/// the first offending definition is cited.
pub struct ExecutableDefinitionsRule;

impl ValidationRule for ExecutableDefinitionsRule {
    fn name(&self) -> &'static str {
        "executable-definitions"
    }

    fn validate(&self, _schema: &Schema, document: &Document) -> Vec<ValidationError> {
        for def in document.definitions() {
            if let Definition::TypeSystem(ts_def) = def {
                return vec![ValidationError::new(
                    self.name(),
                    "The document must contain only executable definitions \
                    (operations and fragments).",
                    vec![document.position(&type_system_position(ts_def))],
                )];
            }
        }
        vec![]
    }
}

fn type_system_position(def: &ast::schema::Definition) -> ast::Pos {
    match def {
        graphql_parser::schema::Definition::SchemaDefinition(d) => d.position,
        graphql_parser::schema::Definition::DirectiveDefinition(d) => d.position,

        graphql_parser::schema::Definition::TypeDefinition(type_def) => match type_def {
            graphql_parser::schema::TypeDefinition::Scalar(t) => t.position,
            graphql_parser::schema::TypeDefinition::Object(t) => t.position,
            graphql_parser::schema::TypeDefinition::Interface(t) => t.position,
            graphql_parser::schema::TypeDefinition::Union(t) => t.position,
            graphql_parser::schema::TypeDefinition::Enum(t) => t.position,
            graphql_parser::schema::TypeDefinition::InputObject(t) => t.position,
        },

        graphql_parser::schema::Definition::TypeExtension(type_ext) => match type_ext {
            graphql_parser::schema::TypeExtension::Scalar(t) => t.position,
            graphql_parser::schema::TypeExtension::Object(t) => t.position,
            graphql_parser::schema::TypeExtension::Interface(t) => t.position,
            graphql_parser::schema::TypeExtension::Union(t) => t.position,
            graphql_parser::schema::TypeExtension::Enum(t) => t.position,
            graphql_parser::schema::TypeExtension::InputObject(t) => t.position,
        },
    }
}

use crate::ast;
use crate::loc;
use crate::schema::Field;
use crate::schema::GraphQLType;
use crate::schema::Parameter;
use crate::schema::Schema;
use crate::schema::TypeAnnotation;
use crate::value::literal_has_variables;
use crate::value::Value;
use crate::value::ValueKind;
use indexmap::IndexMap;
use std::borrow::Cow;
use thiserror::Error;

/// An argument-level problem recorded during preparation or surfaced during
/// per-request coercion.
///
/// Plan-time problems ([`ArgumentError::DuplicateArgument`],
/// [`ArgumentError::InvalidLiteral`],
/// [`ArgumentError::MissingRequiredArgument`],
/// [`ArgumentError::UnknownArgument`]) are stored on the prepared argument
/// so the same operation can be prepared once and rejected cheaply on every
/// request that reaches the affected field.
/// [`ArgumentError::MissingVariable`] can only be discovered at coercion
/// time, once a concrete set of variable values exists.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ArgumentError {
    #[error(
        "there can be only one argument named `{argument_name}` on field \
        `{field_name}` at {location}"
    )]
    DuplicateArgument {
        argument_name: String,
        field_name: String,
        location: loc::FilePosition,
    },

    #[error(
        "invalid literal for argument `{argument_name}` on field \
        `{field_name}` at {location}: expected a value of type \
        `{expected_type}`"
    )]
    InvalidLiteral {
        argument_name: String,
        expected_type: String,
        field_name: String,
        location: loc::FilePosition,
    },

    #[error(
        "field `{field_name}` at {location} is missing the required argument \
        `{argument_name}`"
    )]
    MissingRequiredArgument {
        argument_name: String,
        field_name: String,
        location: loc::FilePosition,
    },

    #[error(
        "argument `{argument_name}` on field `{field_name}` at {location} \
        references variable `${variable_name}`, which was not provided"
    )]
    MissingVariable {
        argument_name: String,
        field_name: String,
        location: loc::FilePosition,
        variable_name: String,
    },

    #[error(
        "unknown argument `{argument_name}` on field `{field_name}` at \
        {location}"
    )]
    UnknownArgument {
        argument_name: String,
        field_name: String,
        location: loc::FilePosition,
    },
}

/// One prepared argument on a prepared selection.
#[derive(Clone, Debug, PartialEq)]
pub struct PreparedArgument<'schema> {
    definition: Option<&'schema Parameter>,
    error: Option<ArgumentError>,
    is_final: bool,
    is_implicit: bool,
    kind: ValueKind,
    literal: Option<ast::query::Value>,
    name: String,
    value: Option<Value>,
}

impl<'schema> PreparedArgument<'schema> {
    /// The matching [`Parameter`] on the schema field, when the argument's
    /// name resolved to one.
    pub fn definition(&self) -> Option<&'schema Parameter> {
        self.definition
    }

    pub fn error(&self) -> Option<&ArgumentError> {
        self.error.as_ref()
    }

    /// Whether this argument's value is fully resolved, with no variable
    /// substitution left to perform.
    pub fn is_final(&self) -> bool {
        self.is_final
    }

    /// Whether the argument was filled in from the parameter's default value
    /// rather than written in the document.
    pub fn is_implicit(&self) -> bool {
        self.is_implicit
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// The argument literal as written in the document. `None` for implicit
    /// (defaulted) arguments.
    pub fn literal(&self) -> Option<&ast::query::Value> {
        self.literal.as_ref()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The resolved constant value. `None` until variables have been
    /// substituted, and `None` forever for arguments carrying a plan-time
    /// error.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }
}

/// The prepared arguments of one field occurrence, keyed by argument name in
/// document order.
///
/// Built once at preparation time. Maps with no variable references are
/// marked final and shared by every request; the rest go through
/// [`try_coerce`](PreparedArgumentMap::try_coerce) per request.
#[derive(Clone, Debug, PartialEq)]
pub struct PreparedArgumentMap<'schema> {
    arguments: IndexMap<String, PreparedArgument<'schema>>,
    field_name: String,
    has_errors: bool,
    is_final: bool,
    location: loc::FilePosition,
}

impl<'schema> PreparedArgumentMap<'schema> {
    pub(crate) fn prepare(
        schema: &'schema Schema,
        field: &ast::query::Field,
        field_def: &'schema Field,
        location: loc::FilePosition,
    ) -> Self {
        let mut arguments: IndexMap<String, PreparedArgument<'schema>> =
            IndexMap::new();
        for (arg_name, literal) in &field.arguments {
            if let Some(prior) = arguments.get_mut(arg_name.as_str()) {
                prior.error.get_or_insert_with(||
                    ArgumentError::DuplicateArgument {
                        argument_name: arg_name.clone(),
                        field_name: field.name.clone(),
                        location: location.clone(),
                    }
                );
                prior.is_final = true;
                prior.value = None;
                continue;
            }

            let definition = field_def.parameter(arg_name);
            let mut error = definition.is_none().then(||
                ArgumentError::UnknownArgument {
                    argument_name: arg_name.clone(),
                    field_name: field.name.clone(),
                    location: location.clone(),
                }
            );

            let arg = if literal_has_variables(literal) {
                PreparedArgument {
                    definition,
                    error,
                    is_final: false,
                    is_implicit: false,
                    kind: ValueKind::of_literal(literal),
                    literal: Some(literal.clone()),
                    name: arg_name.clone(),
                    value: None,
                }
            } else {
                if error.is_none()
                    && let Some(param) = definition
                    && !literal_matches(schema, literal, param.type_annotation())
                {
                    error = Some(ArgumentError::InvalidLiteral {
                        argument_name: arg_name.clone(),
                        expected_type: param.type_annotation().to_string(),
                        field_name: field.name.clone(),
                        location: location.clone(),
                    });
                }
                let value = error.is_none().then(|| Value::from_ast(literal));
                PreparedArgument {
                    definition,
                    error,
                    is_final: true,
                    is_implicit: false,
                    kind: ValueKind::of_literal(literal),
                    literal: Some(literal.clone()),
                    name: arg_name.clone(),
                    value,
                }
            };
            arguments.insert(arg_name.clone(), arg);
        }

        for param in field_def.parameters() {
            if arguments.contains_key(param.name()) {
                continue;
            }
            if let Some(default) = param.default_value() {
                arguments.insert(param.name().to_string(), PreparedArgument {
                    definition: Some(param),
                    error: None,
                    is_final: true,
                    is_implicit: true,
                    kind: ValueKind::of_literal(default),
                    literal: None,
                    name: param.name().to_string(),
                    value: Some(Value::from_ast(default)),
                });
            } else if param.is_required() {
                arguments.insert(param.name().to_string(), PreparedArgument {
                    definition: Some(param),
                    error: Some(ArgumentError::MissingRequiredArgument {
                        argument_name: param.name().to_string(),
                        field_name: field.name.clone(),
                        location: location.clone(),
                    }),
                    is_final: true,
                    is_implicit: true,
                    kind: ValueKind::Unknown,
                    literal: None,
                    name: param.name().to_string(),
                    value: None,
                });
            }
        }

        let has_errors = arguments.values().any(|arg| arg.error.is_some());
        let is_final = arguments.values().all(|arg| arg.is_final);
        PreparedArgumentMap {
            arguments,
            field_name: field.name.clone(),
            has_errors,
            is_final,
            location,
        }
    }

    pub(crate) fn empty(
        field_name: String,
        location: loc::FilePosition,
    ) -> Self {
        PreparedArgumentMap {
            arguments: IndexMap::new(),
            field_name,
            has_errors: false,
            is_final: true,
            location,
        }
    }

    pub fn get(&self, name: &str) -> Option<&PreparedArgument<'schema>> {
        self.arguments.get(name)
    }

    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    /// Whether every argument is already resolved and the map can be reused
    /// as-is for any request.
    pub fn is_final(&self) -> bool {
        self.is_final
    }

    pub fn iter(
        &self,
    ) -> impl Iterator<Item = &PreparedArgument<'schema>> {
        self.arguments.values()
    }

    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    /// Resolve this argument map against one request's variable values.
    ///
    /// Returns `Cow::Borrowed` when the map is already final, an owned map
    /// with every variable substituted otherwise, and `None` when coercion
    /// cannot succeed. Every failure is passed to `report_error` before
    /// returning, so the caller gets one callback per problem argument even
    /// when several fail at once. Pure: neither `self` nor any shared plan
    /// state is mutated.
    pub fn try_coerce(
        &self,
        variable_values: &IndexMap<String, Value>,
        report_error: &mut dyn FnMut(&ArgumentError),
    ) -> Option<Cow<'_, PreparedArgumentMap<'schema>>> {
        if self.has_errors {
            for arg in self.arguments.values() {
                if let Some(error) = &arg.error {
                    report_error(error);
                }
            }
            return None;
        }

        if self.is_final {
            return Some(Cow::Borrowed(self));
        }

        let mut arguments = IndexMap::with_capacity(self.arguments.len());
        let mut failed = false;
        for (name, arg) in &self.arguments {
            if arg.is_final {
                arguments.insert(name.clone(), arg.clone());
                continue;
            }

            let literal = arg.literal.as_ref()
                .expect("non-final arguments always carry a literal");
            match rewrite_literal(literal, variable_values) {
                Ok(rewritten) => {
                    let value = Value::from_ast(&rewritten);
                    arguments.insert(name.clone(), PreparedArgument {
                        definition: arg.definition,
                        error: None,
                        is_final: true,
                        is_implicit: false,
                        kind: value.kind(),
                        literal: Some(rewritten),
                        name: name.clone(),
                        value: Some(value),
                    });
                },

                Err(variable_name) => {
                    failed = true;
                    report_error(&ArgumentError::MissingVariable {
                        argument_name: name.clone(),
                        field_name: self.field_name.clone(),
                        location: self.location.clone(),
                        variable_name,
                    });
                },
            }
        }

        if failed {
            return None;
        }
        Some(Cow::Owned(PreparedArgumentMap {
            arguments,
            field_name: self.field_name.clone(),
            has_errors: false,
            is_final: true,
            location: self.location.clone(),
        }))
    }
}

/// Replace every variable reference in `literal` with the matching entry
/// from `variable_values`, rendered back into literal syntax. Fails with the
/// variable's name if no value was provided for it.
fn rewrite_literal(
    literal: &ast::query::Value,
    variable_values: &IndexMap<String, Value>,
) -> Result<ast::query::Value, String> {
    match literal {
        ast::query::Value::Variable(var_name) =>
            variable_values.get(var_name)
                .map(value_to_literal)
                .ok_or_else(|| var_name.clone()),

        ast::query::Value::List(items) =>
            Ok(ast::query::Value::List(
                items.iter()
                    .map(|item| rewrite_literal(item, variable_values))
                    .collect::<Result<_, _>>()?
            )),

        ast::query::Value::Object(entries) =>
            Ok(ast::query::Value::Object(
                entries.iter()
                    .map(|(key, entry)| Ok((
                        key.clone(),
                        rewrite_literal(entry, variable_values)?,
                    )))
                    .collect::<Result<_, String>>()?
            )),

        constant => Ok(constant.clone()),
    }
}

fn value_to_literal(value: &Value) -> ast::query::Value {
    match value {
        Value::Bool(b) => ast::query::Value::Boolean(*b),
        Value::EnumValue(name) => ast::query::Value::Enum(name.clone()),
        Value::Float(f) => ast::query::Value::Float(*f),
        Value::Int(n) => ast::query::Value::Int(n.clone()),
        Value::List(items) =>
            ast::query::Value::List(
                items.iter().map(value_to_literal).collect()
            ),
        Value::Null => ast::query::Value::Null,
        Value::Object(entries) =>
            ast::query::Value::Object(
                entries.iter()
                    .map(|(key, entry)| (key.clone(), value_to_literal(entry)))
                    .collect()
            ),
        Value::String(s) => ast::query::Value::String(s.clone()),
    }
}

/// Shallow shape check of a constant literal against a declared argument
/// type. Catches the unambiguous mismatches (null for non-null, a string
/// where an Int is declared, an undefined enum value) without reimplementing
/// full input coercion; custom scalars accept anything.
fn literal_matches(
    schema: &Schema,
    literal: &ast::query::Value,
    annotation: &TypeAnnotation,
) -> bool {
    if matches!(literal, ast::query::Value::Null) {
        return annotation.is_nullable();
    }
    match annotation {
        TypeAnnotation::List(list) => match literal {
            ast::query::Value::List(items) =>
                items.iter().all(|item|
                    literal_matches(schema, item, &list.inner)
                ),
            // Non-list input is coerced to a single-item list.
            single => literal_matches(schema, single, &list.inner),
        },

        TypeAnnotation::Named(named) => {
            let Some(graphql_type) = schema.type_named(&named.name) else {
                return true;
            };
            match graphql_type {
                GraphQLType::Enum(enum_type) => match literal {
                    ast::query::Value::Enum(value) =>
                        enum_type.value(value).is_some(),
                    _ => false,
                },

                GraphQLType::InputObject(_) =>
                    matches!(literal, ast::query::Value::Object(_)),

                GraphQLType::Scalar(scalar) if scalar.is_builtin() =>
                    builtin_scalar_accepts(scalar.name(), literal),

                // Custom scalars define their own coercion.
                _ => true,
            }
        },
    }
}

fn builtin_scalar_accepts(
    scalar_name: &str,
    literal: &ast::query::Value,
) -> bool {
    match scalar_name {
        "Boolean" => matches!(literal, ast::query::Value::Boolean(_)),
        "Float" => matches!(
            literal,
            ast::query::Value::Float(_) | ast::query::Value::Int(_),
        ),
        "ID" => matches!(
            literal,
            ast::query::Value::Int(_) | ast::query::Value::String(_),
        ),
        "Int" => matches!(literal, ast::query::Value::Int(_)),
        "String" => matches!(literal, ast::query::Value::String(_)),
        _ => true,
    }
}

use crate::ast;
use indexmap::IndexMap;

/// A fully resolved constant value: the result of coercing an argument
/// literal once every variable reference has been substituted away.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    EnumValue(String),
    Float(f64),
    Int(ast::Number),
    List(Vec<Value>),
    Null,
    Object(IndexMap<String, Value>),
    String(String),
}
impl Value {
    pub fn as_str(&self) -> Option<&str> {
        if let Self::String(str) = self {
            Some(str.as_str())
        } else {
            None
        }
    }

    /// Convert an AST literal into a resolved [`Value`].
    ///
    /// The literal must be constant. Encountering a variable reference here is
    /// an internal invariant violation: callers substitute variables before
    /// resolving.
    pub(crate) fn from_ast(ast_value: &ast::query::Value) -> Self {
        match ast_value {
            ast::query::Value::Variable(var_name) => unreachable!(
                "variable `${var_name}` must be substituted before value \
                resolution",
            ),

            ast::query::Value::Int(value) =>
                Value::Int(value.clone()),

            ast::query::Value::Float(value) =>
                Value::Float(*value),

            ast::query::Value::String(value) =>
                Value::String(value.clone()),

            ast::query::Value::Boolean(value) =>
                Value::Bool(*value),

            ast::query::Value::Null =>
                Value::Null,

            ast::query::Value::Enum(value) =>
                Value::EnumValue(value.clone()),

            ast::query::Value::List(values) =>
                Value::List(values.iter().map(Value::from_ast).collect()),

            ast::query::Value::Object(entries) =>
                Value::Object(entries.iter().map(|(key, ast_value)|
                    (key.clone(), Value::from_ast(ast_value))
                ).collect()),
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Boolean,
            Value::EnumValue(_) => ValueKind::Enum,
            Value::Float(_) => ValueKind::Float,
            Value::Int(_) => ValueKind::Int,
            Value::List(_) => ValueKind::List,
            Value::Null => ValueKind::Null,
            Value::Object(_) => ValueKind::Object,
            Value::String(_) => ValueKind::String,
        }
    }
}
impl std::fmt::Display for Value {
    /// Writes the value in GraphQL literal syntax.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(value) => write!(f, "{value}"),
            Value::EnumValue(name) => write!(f, "{name}"),
            // `Debug` keeps the decimal point on whole-number floats, so
            // the literal re-parses as a Float rather than an Int.
            Value::Float(value) => write!(f, "{value:?}"),
            Value::Int(value) => write!(f, "{}", value.as_i64().unwrap_or(0)),
            Value::Null => write!(f, "null"),
            Value::String(value) => write_escaped_string(f, value),

            Value::List(values) => {
                write!(f, "[")?;
                for (idx, value) in values.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, "]")
            },

            Value::Object(entries) => {
                write!(f, "{{")?;
                for (idx, (key, value)) in entries.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            },
        }
    }
}

/// The statically known kind of a prepared argument's value.
///
/// [`ValueKind::Unknown`] is the fallback when the kind cannot be determined
/// without executing: a literal still awaiting variable substitution at its
/// top level.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValueKind {
    Boolean,
    Enum,
    Float,
    Int,
    List,
    Null,
    Object,
    String,
    Unknown,
}
impl ValueKind {
    /// Derive the kind of an AST literal, falling back to
    /// [`ValueKind::Unknown`] for top-level variable references.
    pub fn of_literal(literal: &ast::query::Value) -> Self {
        match literal {
            ast::query::Value::Boolean(_) => ValueKind::Boolean,
            ast::query::Value::Enum(_) => ValueKind::Enum,
            ast::query::Value::Float(_) => ValueKind::Float,
            ast::query::Value::Int(_) => ValueKind::Int,
            ast::query::Value::List(_) => ValueKind::List,
            ast::query::Value::Null => ValueKind::Null,
            ast::query::Value::Object(_) => ValueKind::Object,
            ast::query::Value::String(_) => ValueKind::String,
            ast::query::Value::Variable(_) => ValueKind::Unknown,
        }
    }
}

/// Whether an AST literal contains a variable reference anywhere in its tree.
pub(crate) fn literal_has_variables(literal: &ast::query::Value) -> bool {
    match literal {
        ast::query::Value::Variable(_) => true,
        ast::query::Value::List(values) =>
            values.iter().any(literal_has_variables),
        ast::query::Value::Object(entries) =>
            entries.values().any(literal_has_variables),
        _ => false,
    }
}

/// Write an AST literal in GraphQL literal syntax.
///
/// Unlike [`Value`]'s `Display`, this handles unsubstituted variable
/// references, so it can print non-final argument literals.
pub(crate) fn write_literal<W: std::fmt::Write>(
    f: &mut W,
    literal: &ast::query::Value,
) -> std::fmt::Result {
    match literal {
        ast::query::Value::Variable(name) => write!(f, "${name}"),
        ast::query::Value::Boolean(value) => write!(f, "{value}"),
        ast::query::Value::Enum(name) => write!(f, "{name}"),
        ast::query::Value::Float(value) => write!(f, "{value:?}"),
        ast::query::Value::Int(value) => write!(f, "{}", value.as_i64().unwrap_or(0)),
        ast::query::Value::Null => write!(f, "null"),
        ast::query::Value::String(value) => write_escaped_string(f, value),

        ast::query::Value::List(values) => {
            write!(f, "[")?;
            for (idx, value) in values.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write_literal(f, value)?;
            }
            write!(f, "]")
        },

        ast::query::Value::Object(entries) => {
            write!(f, "{{")?;
            for (idx, (key, value)) in entries.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}: ")?;
                write_literal(f, value)?;
            }
            write!(f, "}}")
        },
    }
}

fn write_escaped_string<W: std::fmt::Write>(
    f: &mut W,
    value: &str,
) -> std::fmt::Result {
    write!(f, "\"")?;
    for ch in value.chars() {
        match ch {
            '"' => write!(f, "\\\"")?,
            '\\' => write!(f, "\\\\")?,
            '\n' => write!(f, "\\n")?,
            '\r' => write!(f, "\\r")?,
            '\t' => write!(f, "\\t")?,
            _ => write!(f, "{ch}")?,
        }
    }
    write!(f, "\"")
}

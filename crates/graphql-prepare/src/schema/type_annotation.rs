use crate::ast;

/// The annotated type of a [`Field`](crate::schema::Field),
/// [`Parameter`](crate::schema::Parameter), or variable definition: a named
/// type possibly wrapped in list and non-null markers.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeAnnotation {
    List(ListTypeAnnotation),
    Named(NamedTypeAnnotation),
}
impl TypeAnnotation {
    pub(crate) fn from_ast_type(ast_type: &ast::query::Type) -> Self {
        Self::from_ast_type_impl(ast_type, /* nullable = */ true)
    }

    fn from_ast_type_impl(ast_type: &ast::query::Type, nullable: bool) -> Self {
        match ast_type {
            graphql_parser::query::Type::NamedType(name) =>
                Self::Named(NamedTypeAnnotation {
                    name: name.clone(),
                    nullable,
                }),

            graphql_parser::query::Type::ListType(inner) =>
                Self::List(ListTypeAnnotation {
                    inner: Box::new(Self::from_ast_type_impl(inner, true)),
                    nullable,
                }),

            graphql_parser::query::Type::NonNullType(inner) =>
                Self::from_ast_type_impl(inner, false),
        }
    }

    /// The name of the type at the center of all list/non-null wrappers.
    pub fn innermost_named_type(&self) -> &str {
        match self {
            Self::List(annot) => annot.inner.innermost_named_type(),
            Self::Named(annot) => annot.name.as_str(),
        }
    }

    pub fn is_nullable(&self) -> bool {
        match self {
            Self::List(annot) => annot.nullable,
            Self::Named(annot) => annot.nullable,
        }
    }
}
impl std::fmt::Display for TypeAnnotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let nullable = match self {
            Self::List(annot) => {
                write!(f, "[{}]", annot.inner)?;
                annot.nullable
            },
            Self::Named(annot) => {
                write!(f, "{}", annot.name)?;
                annot.nullable
            },
        };
        if !nullable {
            write!(f, "!")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListTypeAnnotation {
    pub inner: Box<TypeAnnotation>,
    pub nullable: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NamedTypeAnnotation {
    pub name: String,
    pub nullable: bool,
}

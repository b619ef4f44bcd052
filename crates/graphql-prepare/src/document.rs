use crate::ast;
use crate::loc;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// One definition within a [`Document`].
///
/// GraphQL's *Document* grammar admits type-system definitions alongside
/// executable ones; servers must reject the former during validation rather
/// than at parse time. The parser collaborator splits the two grammars, so
/// this envelope reunites them into the full grammar.
#[derive(Clone, Debug, PartialEq)]
pub enum Definition {
    Fragment(ast::query::FragmentDefinition),
    Operation(ast::query::OperationDefinition),
    TypeSystem(ast::schema::Definition),
}

/// A parsed GraphQL document: the immutable syntax-tree input to validation
/// and preparation.
///
/// The document exclusively owns its definitions; no node is shared across
/// documents.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    definitions: Vec<Definition>,
    source_path: Option<PathBuf>,
}
impl Document {
    pub fn new(
        definitions: Vec<Definition>,
        source_path: Option<PathBuf>,
    ) -> Self {
        Self {
            definitions,
            source_path,
        }
    }

    /// Parse a document from source text.
    ///
    /// The executable grammar is tried first. If it fails, the type-system
    /// grammar is tried so that a document made of type-system definitions
    /// parses successfully and is then rejected by validation (with a proper
    /// validation error instead of an opaque parse error). If both grammars
    /// fail, the executable grammar's error is reported.
    pub fn parse(
        content: impl AsRef<str>,
        source_path: Option<&Path>,
    ) -> Result<Self, DocumentParseError> {
        let content = content.as_ref();
        let query_err = match ast::query::parse(content) {
            Ok(ast_doc) => return Ok(Self::from_query_ast(ast_doc, source_path)),
            Err(err) => err,
        };

        if let Ok(ast_doc) = ast::schema::parse(content) {
            return Ok(Self {
                definitions: ast_doc.definitions
                    .into_iter()
                    .map(Definition::TypeSystem)
                    .collect(),
                source_path: source_path.map(|p| p.to_path_buf()),
            });
        }

        Err(DocumentParseError::Syntax(Arc::new(query_err)))
    }

    /// Wrap a parser-produced executable document.
    pub fn from_query_ast(
        ast_doc: ast::query::Document,
        source_path: Option<&Path>,
    ) -> Self {
        Self {
            definitions: ast_doc.definitions
                .into_iter()
                .map(|def| match def {
                    graphql_parser::query::Definition::Operation(op) =>
                        Definition::Operation(op),
                    graphql_parser::query::Definition::Fragment(frag) =>
                        Definition::Fragment(frag),
                })
                .collect(),
            source_path: source_path.map(|p| p.to_path_buf()),
        }
    }

    pub fn definitions(&self) -> &[Definition] {
        &self.definitions
    }

    pub fn fragments(&self) -> impl Iterator<Item = &ast::query::FragmentDefinition> {
        self.definitions.iter().filter_map(|def| match def {
            Definition::Fragment(frag) => Some(frag),
            _ => None,
        })
    }

    pub fn operations(&self) -> impl Iterator<Item = &ast::query::OperationDefinition> {
        self.definitions.iter().filter_map(|def| match def {
            Definition::Operation(op) => Some(op),
            _ => None,
        })
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// The [`loc::FilePosition`] of an AST position within this document.
    pub(crate) fn position(&self, pos: &ast::Pos) -> loc::FilePosition {
        loc::FilePosition::from_pos(self.source_path.as_deref(), *pos)
    }
}

#[derive(Clone, Debug, Error)]
pub enum DocumentParseError {
    #[error("error parsing document: {0}")]
    Syntax(Arc<ast::query::ParseError>),
}

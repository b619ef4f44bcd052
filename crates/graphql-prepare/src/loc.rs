use serde::Serialize;
use std::path::Path;
use std::path::PathBuf;

/// Very similar to the parser's [`Pos`](crate::ast::Pos), except it can also
/// carry the path of the file the position refers to.
///
/// Serializes to the `{ "line": .., "column": .. }` shape used by the
/// `locations` entries of a GraphQL response error.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct FilePosition {
    pub column: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    pub line: usize,
}
impl FilePosition {
    pub fn from_pos<P: AsRef<Path>>(
        file: Option<P>,
        pos: crate::ast::Pos,
    ) -> Self {
        Self {
            column: pos.column,
            file: file.map(|f| f.as_ref().to_path_buf()),
            line: pos.line,
        }
    }
}
/// Where a schema element was defined: in SDL source, or implicitly as part
/// of the GraphQL language itself.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SchemaDefLocation {
    GraphQLBuiltIn,
    Schema(FilePosition),
}

impl std::fmt::Display for FilePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.file {
            Some(path) => write!(f, "{}:{}:{}", path.display(), self.line, self.column),
            None => write!(f, "{}:{}", self.line, self.column),
        }
    }
}

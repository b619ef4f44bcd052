//! Document validation and execution-plan preparation for GraphQL services.
//!
//! The crate sits between parsing and execution: given a
//! [`Schema`] snapshot and a parsed [`Document`], it validates the document
//! against a pluggable rule pipeline and compiles one operation into an
//! immutable [`PreparedOperation`](prepare::PreparedOperation) — fragments
//! spliced away, selections merged per concrete type, constant
//! `@skip`/`@include` conditions folded, and arguments pre-coerced as far as
//! variables allow. Executors consume the plan read-only and share it across
//! requests and threads.
//!
//! ```
//! use graphql_prepare::prepare::PrepareOptions;
//! use graphql_prepare::Document;
//! use graphql_prepare::SchemaBuilder;
//!
//! let schema = SchemaBuilder::from_str("type Query { greeting: String }", None)
//!     .and_then(SchemaBuilder::build)
//!     .expect("schema is well-formed");
//! let document = Document::parse("{ greeting }", None)
//!     .expect("document is syntactically valid");
//!
//! let operation = graphql_prepare::prepare(
//!     &schema,
//!     &document,
//!     None,
//!     &PrepareOptions::default(),
//! ).expect("document is valid");
//! assert_eq!(operation.get_root_selections().len(), 1);
//! ```

pub mod ast;
mod document;
pub mod loc;
pub mod prepare;
pub mod schema;
pub mod validation;
mod value;

pub use document::Definition;
pub use document::Document;
pub use document::DocumentParseError;
pub use prepare::prepare;
pub use prepare::PrepareError;
pub use prepare::PrepareOptions;
pub use schema::Schema;
pub use schema::SchemaBuildError;
pub use schema::SchemaBuilder;
pub use validation::DocumentValidator;
pub use validation::ValidationResult;
pub use value::Value;
pub use value::ValueKind;

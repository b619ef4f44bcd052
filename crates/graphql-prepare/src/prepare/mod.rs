mod arguments;
mod collect;
mod field_visibility;
mod operation_compiler;
mod prepared_operation;
mod prepared_selection;
mod prepared_selection_set;

#[cfg(test)]
mod tests;

pub use arguments::ArgumentError;
pub use arguments::PreparedArgument;
pub use arguments::PreparedArgumentMap;
pub use field_visibility::FieldVisibility;
pub use field_visibility::VisibilityDirective;
pub use operation_compiler::prepare;
pub use operation_compiler::PrepareError;
pub use operation_compiler::PrepareOptions;
pub use prepared_operation::PreparedOperation;
pub use prepared_selection::PreparedSelection;
pub use prepared_selection::PreparedSelectionList;
pub use prepared_selection_set::PreparedSelectionSet;

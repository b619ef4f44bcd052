/// The directive a [FieldVisibility] entry originated from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VisibilityDirective {
    Include,
    Skip,
}

/// A variable-conditioned `@skip` or `@include` occurrence attached to a
/// prepared selection.
///
/// Constant conditions never produce an entry: `@skip(if: true)` and
/// `@include(if: false)` exclude the occurrence during preparation, while
/// `@skip(if: false)` and `@include(if: true)` are dropped as no-ops. Only
/// conditions referencing a variable survive to execution time, where the
/// executor evaluates each entry against the request's variable values.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldVisibility {
    directive: VisibilityDirective,
    variable: String,
}

impl FieldVisibility {
    pub(crate) fn new(
        directive: VisibilityDirective,
        variable: String,
    ) -> Self {
        FieldVisibility {
            directive,
            variable,
        }
    }

    pub fn directive(&self) -> VisibilityDirective {
        self.directive
    }

    /// The name of the variable the condition reads, without the `$` sigil.
    pub fn variable(&self) -> &str {
        &self.variable
    }
}

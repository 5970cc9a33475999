//! Error types for query evaluation and request validation.

/// Errors surfaced to the caller as request-level failures.
///
/// Malformed predicates are not represented here; they are dropped locally
/// during translation and never abort a query.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// A predicate names a field that is not part of the record schema.
    #[error("unknown field in filter expression: {0:?}")]
    InvalidField(String),
    /// A relational comparison against a numeric field with a value that
    /// cannot be coerced to the field's numeric type.
    #[error("cannot compare value {value:?} against numeric field {field:?}")]
    TypeMismatch {
        /// Field name as given in the filter expression.
        field: String,
        /// Offending value.
        value: String,
    },
    /// The disease or allele level was queried without a parent identifier.
    #[error("missing parent identifier for level {0:?}")]
    MissingParentId(String),
}

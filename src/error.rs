//! Error types for the translation pipeline.
//!
//! Every failure the translator can report is an expected outcome of bad
//! input, so all of them are plain values. Presentation layers should map
//! any `TranslateError` to a client error.

use crate::catalog::ColumnType;

/// Result type for translation operations.
pub type TranslateResult<T> = Result<T, TranslateError>;

/// Errors that can occur while translating a query.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TranslateError {
    #[error("Query is empty.")]
    EmptyQuery,

    #[error("Malformed query: {0}")]
    MalformedQuery(String),

    #[error("Table '{0}' does not exist in the schema.")]
    UnknownTable(String),

    /// `table` is `None` for bare fields owned by no referenced table.
    #[error("Field '{field}' does not exist in {}.", describe_scope(.table))]
    UnknownField {
        field: String,
        table: Option<String>,
    },

    #[error("Field '{field}' is ambiguous: it exists in {}. Qualify it.", .tables.join(", "))]
    AmbiguousField { field: String, tables: Vec<String> },

    #[error("Alias '{alias}' is used for both '{first}' and '{second}'.")]
    DuplicateAlias {
        alias: String,
        first: String,
        second: String,
    },

    #[error("Type mismatch: Field '{field}' expects {expected}, but got {found}.")]
    TypeMismatch {
        field: String,
        expected: ColumnType,
        found: String,
    },

    #[error("Field '{field}' has unsupported type '{declared}' for comparison.")]
    UnsupportedType { field: String, declared: String },
}

fn describe_scope(table: &Option<String>) -> String {
    match table {
        Some(t) => format!("table '{}'", t),
        None => "any referenced table".to_string(),
    }
}

impl TranslateError {
    /// Stable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            TranslateError::EmptyQuery => "EmptyQuery",
            TranslateError::MalformedQuery(_) => "MalformedQuery",
            TranslateError::UnknownTable(_) => "UnknownTable",
            TranslateError::UnknownField { .. } => "UnknownField",
            TranslateError::AmbiguousField { .. } => "AmbiguousField",
            TranslateError::DuplicateAlias { .. } => "DuplicateAlias",
            TranslateError::TypeMismatch { .. } => "TypeMismatch",
            TranslateError::UnsupportedType { .. } => "UnsupportedType",
        }
    }

    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        TranslateError::MalformedQuery(msg.into())
    }
}

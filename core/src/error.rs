//! Error types for table parsing.
//!
//! Every failure aborts the whole parse call; no partially built table is
//! ever returned alongside an error.

use thiserror::Error;

/// Errors that can occur while parsing a positional table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// The header line is empty or contains only whitespace, so no columns
    /// could be derived from it.
    #[error("malformed header: no columns found in {header:?}")]
    MalformedHeader {
        /// The offending header line.
        header: String,
    },

    /// A column declared as integer holds a value that is not a base-10
    /// integer.
    #[error("malformed field on data line {line}: column '{column}' expects an integer, found {value:?}")]
    MalformedField {
        /// 1-based index of the data line (the header is not counted).
        line: usize,
        /// Name of the integer column.
        column: String,
        /// The raw, trimmed value that failed to parse.
        value: String,
    },
}

/// Convenience alias for results with [`TableError`].
pub type Result<T> = std::result::Result<T, TableError>;

//! Error types for table operations

use thiserror::Error;

/// Errors raised by table parsing, queries and persistence
#[derive(Debug, Error)]
pub enum TableError {
    /// Column name is not one of the table's columns (nor its quoted variant)
    #[error("invalid header name: {0}")]
    ColumnNotFound(String),

    /// No row holds the requested value under the requested column
    #[error("{value} was not found under the {column} header")]
    RowNotFound { column: String, value: String },

    /// No parser is registered for the file extension
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, TableError>;

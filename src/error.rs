//! Error types for relational operations

/// Errors raised by table construction, index building, joins and frame filters
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A table was requested from an empty sequence of rows
    #[error("cannot build a table from an empty sequence of rows")]
    EmptyInput,

    /// A row lacks a key that the operation needs on every row
    #[error("row {row} has no value for key {key}")]
    MissingKey { key: String, row: usize },

    /// A frame was asked for a column it does not have
    #[error("unknown column {0}")]
    UnknownColumn(String),

    /// A frame row is too short to hold the requested column
    #[error("row {row} has {len} cells, column index {index} is out of range")]
    RaggedRow { row: usize, len: usize, index: usize },
}

impl Error {
    pub(crate) fn missing_key<K: std::fmt::Debug>(key: &K, row: usize) -> Self {
        Error::MissingKey {
            key: format!("{:?}", key),
            row,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

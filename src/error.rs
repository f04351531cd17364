//! Error types for the lending engine.
//!
//! Business-rule failures (duplicate ids, unknown books, unavailable books)
//! are reported as `bool`/`Option` by the store itself. The types here cover
//! the cases that must stop the caller: cursor misuse, storage failures and
//! malformed input files.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for fallible library operations
pub type Result<T> = std::result::Result<T, LibraryError>;

/// Errors that can surface from the lending engine
#[derive(Debug, Error)]
pub enum LibraryError {
    /// `try_next` was called on a cursor with no remaining elements
    #[error("cursor exhausted: no elements remain")]
    Exhausted,

    /// `remove` was called before `try_next`, or twice for the same element
    #[error("remove() requires a preceding call to try_next()")]
    NoCurrentElement,

    /// The cursor's element type cannot be removed from the store
    #[error("{0} records cannot be removed through a cursor")]
    RemovalUnsupported(&'static str),

    /// Reading or writing a file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File that was being accessed
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// A snapshot or config file could not be (de)serialized
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Snapshot was written by an incompatible format version
    #[error("unsupported snapshot format version {found} (expected {expected})")]
    UnsupportedFormat {
        /// Version found in the file
        found: u32,
        /// Version this build understands
        expected: u32,
    },

    /// The first line of a tabular file is not the expected header
    #[error("invalid header: expected `{expected}`, found `{found}`")]
    InvalidHeader {
        /// Header this parser accepts
        expected: String,
        /// Header line actually read
        found: String,
    },

    /// A record cannot be written so that it reads back unchanged
    #[error("record `{id}` cannot be written: {reason}")]
    UnwritableRecord {
        /// Identifier of the offending record
        id: String,
        /// What is wrong with it
        reason: RecordError,
    },

    /// A configuration value is missing or malformed
    #[error("configuration error: {0}")]
    Config(String),
}

impl LibraryError {
    /// Wrap an I/O error together with the path it occurred on
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

/// Reasons a single tabular record is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The line does not split into the expected number of fields
    #[error("expected {expected} fields, found {found}")]
    FieldCount {
        /// Number of fields in the header
        expected: usize,
        /// Number of fields on the line
        found: usize,
    },

    /// The identifier column is blank
    #[error("identifier is empty")]
    EmptyIdentifier,

    /// A numeric column could not be parsed
    #[error("field `{field}` is not a valid number: `{value}`")]
    InvalidNumber {
        /// Column name
        field: &'static str,
        /// Raw text found in the column
        value: String,
    },

    /// A text column holds the delimiter, a line break, or padding whitespace
    #[error("field `{field}` contains the delimiter, a line break or surrounding whitespace")]
    UnencodableField {
        /// Column name
        field: &'static str,
    },
}

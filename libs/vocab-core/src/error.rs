//! Error types for vocab-core.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using ParseError.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Problems found while reading an import source.
///
/// Line-level variants are reported as diagnostics and the import carries on;
/// `MissingColumn` rejects a tabular source as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("missing ':' separator at line {line}")]
    MissingSeparator { line: usize },

    #[error("empty side at line {line}")]
    EmptySide { line: usize },

    #[error("missing value for {column} at line {line}")]
    MissingField { line: usize, column: &'static str },

    #[error("unterminated quoted field at line {line}")]
    UnterminatedQuote { line: usize },

    #[error("no column for {column} in header")]
    MissingColumn { column: &'static str },
}

/// Errors raised while loading or saving the item collection.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid data in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("storage error: {0}")]
    Unavailable(String),
}

/// Errors surfaced to session drivers.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("item {0} not found")]
    MissingItem(u64),

    #[error("invalid direction: {0}")]
    InvalidDirection(String),

    #[error("invalid item id: {0}")]
    InvalidId(String),

    #[error("no prompt is waiting for an answer")]
    NotAwaitingInput,

    #[error(transparent)]
    Store(#[from] StoreError),
}

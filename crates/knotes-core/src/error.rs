//! Error types for knotes-core

use thiserror::Error;

/// Result type alias using knotes-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in knotes-core storage operations
#[derive(Error, Debug)]
pub enum Error {
    /// SQLite error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Note not found
    #[error("Note with id {0} not found!")]
    NotFound(String),
}

use std::io;

use knotes_core::config::ConfigError;
use knotes_core::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Not a note ID or link: {0}")]
    InvalidNoteId(String),
    #[error("Could not reach the note store at {0}; nothing was saved")]
    NoteUnavailable(String),
}

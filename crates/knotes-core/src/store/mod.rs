//! Client side of the remote note store.
//!
//! The auto-save controller only needs four calls: create, read, update and
//! (for tooling) metadata. `NoteStore` is the seam that lets tests swap the
//! HTTP transport for an in-process fake.

use std::future::Future;

use thiserror::Error;

use crate::models::{Note, NoteId, NoteMetadata};

mod http;

pub use http::HttpNoteStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Note with id {0} not found!")]
    NotFound(String),
    #[error("Invalid note store configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Note store HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Note store API error: {message}")]
    Api { status: u16, message: String },
    #[error("Invalid note store payload: {0}")]
    InvalidPayload(String),
}

impl StoreError {
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Remote note store operations used by knotes clients
pub trait NoteStore: Send + Sync + 'static {
    /// Create a note with the given content; the store assigns the id
    fn create(&self, content: &str) -> impl Future<Output = StoreResult<Note>> + Send;

    /// Fetch a note, failing with `StoreError::NotFound` when it doesn't exist
    fn get(&self, id: &NoteId) -> impl Future<Output = StoreResult<Note>> + Send;

    /// Replace a note's content
    fn update(&self, id: &NoteId, content: &str) -> impl Future<Output = StoreResult<()>> + Send;

    /// Fetch a note's timestamps
    fn metadata(&self, id: &NoteId) -> impl Future<Output = StoreResult<NoteMetadata>> + Send;
}

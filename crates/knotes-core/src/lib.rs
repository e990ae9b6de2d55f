//! knotes-core - Core library for knotes
//!
//! This crate contains the note model, the SQLite repository used by the
//! note store server, the HTTP note store client, and the auto-save
//! controller shared by every knotes client.

pub mod config;
pub mod db;
pub mod error;
pub mod location;
pub mod models;
pub mod store;
pub mod sync;
pub mod util;

pub use error::{Error, Result};
pub use models::{Note, NoteId, NoteMetadata};
pub use store::{HttpNoteStore, NoteStore, StoreError};
pub use sync::{NoteSyncController, NoteView, SyncOptions};

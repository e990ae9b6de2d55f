//! Database layer for the knotes note store

mod connection;
mod migrations;
mod repository;

pub use connection::Database;
pub use repository::{NoteRepository, SqliteNoteRepository};

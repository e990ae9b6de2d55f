//! Data models for knotes

mod note;

pub use note::{Note, NoteId, NoteMetadata, ParseNoteIdError, NOTE_ID_LEN};

//! Note repository implementation

use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Error, Result};
use crate::models::{Note, NoteId, NoteMetadata};
use crate::util::unix_millis_now;

/// Trait for note storage operations
pub trait NoteRepository {
    /// Create a new note under a freshly minted id
    fn create(&self, content: &str) -> Result<Note>;

    /// Get a note by ID
    fn get(&self, id: &NoteId) -> Result<Option<Note>>;

    /// Get a note's timestamps without loading its content
    fn metadata(&self, id: &NoteId) -> Result<Option<NoteMetadata>>;

    /// Check whether a note exists
    fn exists(&self, id: &NoteId) -> Result<bool>;

    /// Replace a note's content, keeping its creation time
    fn update(&self, id: &NoteId, content: &str) -> Result<Note>;

    /// IDs of all notes with empty content, oldest first
    fn find_empty(&self) -> Result<Vec<NoteId>>;

    /// Hard delete the given notes, returning how many rows were removed
    fn delete_many(&self, ids: &[NoteId]) -> Result<usize>;
}

/// `SQLite` implementation of `NoteRepository`
pub struct SqliteNoteRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteNoteRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn parse_id(raw: String, column: usize) -> rusqlite::Result<NoteId> {
        NoteId::try_from(raw).map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(error))
        })
    }

    /// Parse a note from a database row
    fn parse_note(row: &rusqlite::Row<'_>) -> rusqlite::Result<Note> {
        Ok(Note {
            id: Self::parse_id(row.get(0)?, 0)?,
            content: row.get(1)?,
            created_at: row.get(2)?,
            modified_at: row.get(3)?,
        })
    }
}

impl NoteRepository for SqliteNoteRepository<'_> {
    fn create(&self, content: &str) -> Result<Note> {
        let note = Note::new(content);

        self.conn.execute(
            "INSERT INTO notes (id, content, created_at, modified_at) VALUES (?, ?, ?, ?)",
            params![
                note.id.as_str(),
                note.content,
                note.created_at,
                note.modified_at
            ],
        )?;

        Ok(note)
    }

    fn get(&self, id: &NoteId) -> Result<Option<Note>> {
        let note = self
            .conn
            .query_row(
                "SELECT id, content, created_at, modified_at FROM notes WHERE id = ?",
                params![id.as_str()],
                Self::parse_note,
            )
            .optional()?;

        Ok(note)
    }

    fn metadata(&self, id: &NoteId) -> Result<Option<NoteMetadata>> {
        let metadata = self
            .conn
            .query_row(
                "SELECT id, created_at, modified_at FROM notes WHERE id = ?",
                params![id.as_str()],
                |row| {
                    Ok(NoteMetadata {
                        id: Self::parse_id(row.get(0)?, 0)?,
                        created_at: row.get(1)?,
                        modified_at: row.get(2)?,
                    })
                },
            )
            .optional()?;

        Ok(metadata)
    }

    fn exists(&self, id: &NoteId) -> Result<bool> {
        let exists = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM notes WHERE id = ?)",
            params![id.as_str()],
            |row| row.get(0),
        )?;

        Ok(exists)
    }

    fn update(&self, id: &NoteId, content: &str) -> Result<Note> {
        let now = unix_millis_now();

        let rows = self.conn.execute(
            "UPDATE notes SET content = ?, modified_at = ? WHERE id = ?",
            params![content, now, id.as_str()],
        )?;

        if rows == 0 {
            return Err(Error::NotFound(id.to_string()));
        }

        self.get(id)?.ok_or_else(|| Error::NotFound(id.to_string()))
    }

    fn find_empty(&self) -> Result<Vec<NoteId>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id FROM notes WHERE content = '' ORDER BY created_at ASC")?;

        let ids = stmt
            .query_map([], |row| Self::parse_id(row.get(0)?, 0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(ids)
    }

    fn delete_many(&self, ids: &[NoteId]) -> Result<usize> {
        if ids.is_empty() {
            return Ok(0);
        }

        let tx = self.conn.unchecked_transaction()?;
        let mut removed = 0;
        {
            let mut stmt = tx.prepare("DELETE FROM notes WHERE id = ?")?;
            for id in ids {
                removed += stmt.execute(params![id.as_str()])?;
            }
        }
        tx.commit()?;

        Ok(removed)
    }
}

//! Note model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

use crate::util::unix_millis_now;

/// Length of every note identity token.
pub const NOTE_ID_LEN: usize = 26;

/// Crockford base32 alphabet (no I, L, O, U).
const CROCKFORD: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Error returned when a string is not a valid note identity token
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid note id '{0}': expected 26 alphanumeric characters")]
pub struct ParseNoteIdError(String);

/// The identity token of a note.
///
/// Always exactly 26 ASCII alphanumeric characters, so it can be used as a URL
/// path segment as-is. Minted ids are a UUID v7 rendered in Crockford base32,
/// which keeps them time-sortable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NoteId(String);

impl NoteId {
    /// Mint a new unique note ID
    #[must_use]
    pub fn new() -> Self {
        Self(encode_crockford(Uuid::now_v7().as_u128()))
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether `value` has the shape of a note identity token
    pub fn is_valid(value: &str) -> bool {
        value.len() == NOTE_ID_LEN && value.bytes().all(|byte| byte.is_ascii_alphanumeric())
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NoteId {
    type Err = ParseNoteIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if Self::is_valid(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(ParseNoteIdError(s.to_string()))
        }
    }
}

impl TryFrom<String> for NoteId {
    type Error = ParseNoteIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if Self::is_valid(&value) {
            Ok(Self(value))
        } else {
            Err(ParseNoteIdError(value))
        }
    }
}

impl From<NoteId> for String {
    fn from(id: NoteId) -> Self {
        id.0
    }
}

fn encode_crockford(mut value: u128) -> String {
    let mut out = [0u8; NOTE_ID_LEN];
    for slot in out.iter_mut().rev() {
        *slot = CROCKFORD[(value & 0x1f) as usize];
        value >>= 5;
    }
    out.iter().map(|&byte| char::from(byte)).collect()
}

/// A note in the system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Identity token
    pub id: NoteId,
    /// Plain text content
    pub content: String,
    /// Creation timestamp (Unix ms)
    #[serde(default)]
    pub created_at: i64,
    /// Last modification timestamp (Unix ms)
    #[serde(default)]
    pub modified_at: i64,
}

impl Note {
    /// Create a new note with the given content
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        let now = unix_millis_now();
        Self {
            id: NoteId::new(),
            content: content.into(),
            created_at: now,
            modified_at: now,
        }
    }

    /// Check if note content is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Metadata view of this note (everything but the content)
    #[must_use]
    pub fn metadata(&self) -> NoteMetadata {
        NoteMetadata {
            id: self.id.clone(),
            created_at: self.created_at,
            modified_at: self.modified_at,
        }
    }
}

/// Note timestamps without the content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteMetadata {
    pub id: NoteId,
    pub created_at: i64,
    pub modified_at: i64,
}

//! Mapping between note identities and URL paths.
//!
//! A note lives at `/<id>`. When a client starts, the identity is recovered by
//! scanning the path segments for the first 26-character alphanumeric token.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::NoteId;

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9]{26}$").expect("Invalid regex"))
}

/// Find the first path segment that looks like a note identity token.
///
/// Accepts a bare path (`/01HJ...`), a full URL, or a bare token. Query
/// strings and fragments are ignored.
///
/// # Examples
///
/// ```
/// use knotes_core::location::find_note_token;
///
/// assert_eq!(
///     find_note_token("/01KDECFWYDMS857DZMCR680MCY"),
///     Some("01KDECFWYDMS857DZMCR680MCY")
/// );
/// assert_eq!(find_note_token("/"), None);
/// ```
pub fn find_note_token(path: &str) -> Option<&str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/')
        .find(|segment| !segment.is_empty() && token_pattern().is_match(segment))
}

/// Visible location of a note: `/<id>`
pub fn note_path(id: &NoteId) -> String {
    format!("/{id}")
}

/// Absolute share link for a note under `base_url`
pub fn note_url(base_url: &str, id: &NoteId) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), note_path(id))
}

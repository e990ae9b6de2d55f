use chrono::DateTime;
use knotes_core::config::ClientConfig;
use knotes_core::location::find_note_token;
use knotes_core::{HttpNoteStore, NoteId};

use crate::error::CliError;

/// Resolve client settings from the environment plus the `--server` flag.
pub fn load_config(server: Option<&str>) -> Result<ClientConfig, CliError> {
    let config = ClientConfig::from_env()?;
    match server {
        Some(server) => Ok(config.with_server_url(server)?),
        None => Ok(config),
    }
}

pub fn connect(config: &ClientConfig) -> Result<HttpNoteStore, CliError> {
    Ok(HttpNoteStore::new(config.server_url.as_str())?)
}

/// Accept a share link, a `/<id>` path, or a bare note ID.
pub fn resolve_note_id(raw: &str) -> Result<NoteId, CliError> {
    find_note_token(raw.trim())
        .and_then(|token| token.parse().ok())
        .ok_or_else(|| CliError::InvalidNoteId(raw.to_string()))
}

pub fn format_timestamp(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map_or_else(|| millis.to_string(), |time| time.to_rfc3339())
}

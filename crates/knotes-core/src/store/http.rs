//! HTTP note store client speaking the `/api/notes` JSON API.

use reqwest::header::ACCEPT;
use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};

use super::{NoteStore, StoreError, StoreResult};
use crate::models::{Note, NoteId, NoteMetadata};
use crate::util::{compact_text, is_http_url, normalize_text_option};

const NOTES_PATH: &str = "/api/notes";

#[derive(Clone)]
pub struct HttpNoteStore {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct CreateNoteRequest<'a> {
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct UpdateNoteRequest<'a> {
    id: &'a NoteId,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
    message: Option<String>,
}

impl HttpNoteStore {
    pub fn new(base_url: impl Into<String>) -> StoreResult<Self> {
        let base_url = normalize_base_url(base_url.into())?;
        Ok(Self {
            base_url,
            client: reqwest::Client::builder().build()?,
        })
    }

    /// Server root this client talks to, without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn notes_url(&self) -> String {
        format!("{}{NOTES_PATH}", self.base_url)
    }

    fn note_url(&self, id: &NoteId) -> String {
        format!("{}{NOTES_PATH}/{id}", self.base_url)
    }
}

impl NoteStore for HttpNoteStore {
    async fn create(&self, content: &str) -> StoreResult<Note> {
        let response = self
            .client
            .post(self.notes_url())
            .header(ACCEPT, "application/json")
            .json(&CreateNoteRequest { content })
            .send()
            .await?;

        let response = ensure_success(response, None).await?;
        Ok(response.json::<Note>().await?)
    }

    async fn get(&self, id: &NoteId) -> StoreResult<Note> {
        let response = self
            .client
            .get(self.note_url(id))
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let response = ensure_success(response, Some(id)).await?;
        let note = response.json::<Note>().await?;
        if note.id != *id {
            return Err(StoreError::InvalidPayload(format!(
                "requested note {id} but received {}",
                note.id
            )));
        }
        Ok(note)
    }

    async fn update(&self, id: &NoteId, content: &str) -> StoreResult<()> {
        let response = self
            .client
            .put(self.notes_url())
            .header(ACCEPT, "application/json")
            .json(&UpdateNoteRequest { id, content })
            .send()
            .await?;

        ensure_success(response, Some(id)).await?;
        Ok(())
    }

    async fn metadata(&self, id: &NoteId) -> StoreResult<NoteMetadata> {
        let response = self
            .client
            .get(format!("{}/metadata", self.note_url(id)))
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let response = ensure_success(response, Some(id)).await?;
        Ok(response.json::<NoteMetadata>().await?)
    }
}

async fn ensure_success(response: Response, id: Option<&NoteId>) -> StoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::NOT_FOUND {
        if let Some(id) = id {
            return Err(StoreError::NotFound(id.to_string()));
        }
    }

    let body = response.text().await.unwrap_or_default();
    Err(StoreError::Api {
        status: status.as_u16(),
        message: parse_api_error(status, &body),
    })
}

fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ApiErrorBody>(body) {
        if let Some(message) = payload.error.or(payload.message) {
            return format!("{} ({})", compact_text(&message), status.as_u16());
        }
    }

    let trimmed = compact_text(body);
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", trimmed, status.as_u16())
    }
}

fn normalize_base_url(raw: String) -> StoreResult<String> {
    let base_url = normalize_text_option(Some(raw)).ok_or_else(|| {
        StoreError::InvalidConfiguration("server URL must not be empty".to_string())
    })?;
    if is_http_url(&base_url) {
        Ok(base_url.trim_end_matches('/').to_string())
    } else {
        Err(StoreError::InvalidConfiguration(
            "server URL must include http:// or https://".to_string(),
        ))
    }
}

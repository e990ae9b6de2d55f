use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use knotes_core::{Note, NoteId, NoteMetadata};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::service::NoteService;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    notes: NoteService,
}

impl AppState {
    pub const fn new(config: Arc<AppConfig>, notes: NoteService) -> Self {
        Self { config, notes }
    }
}

pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/notes", post(create_note).put(update_note))
        .route("/api/notes/{id}", get(find_note))
        .route("/api/notes/{id}/metadata", get(find_metadata))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods(Any),
        )
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp: i64,
}

async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now().timestamp(),
    })
}

#[derive(Debug, Deserialize)]
struct CreateNoteRequest {
    #[serde(default, alias = "note")]
    content: String,
}

#[derive(Debug, Deserialize)]
struct UpdateNoteRequest {
    id: String,
    #[serde(default)]
    content: String,
}

/// Malformed ids can never name a stored note, so they are reported as missing.
fn parse_note_id(raw: &str) -> Result<NoteId, AppError> {
    raw.parse().map_err(|_| AppError::note_not_found(raw))
}

async fn create_note(
    State(state): State<AppState>,
    payload: Result<Json<CreateNoteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Note>), AppError> {
    let Json(request) = payload?;
    let note = state.notes.save(&request.content).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

async fn find_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Note>, AppError> {
    let id = parse_note_id(&id)?;
    Ok(Json(state.notes.find_by_id(&id).await?))
}

async fn find_metadata(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<NoteMetadata>, AppError> {
    let id = parse_note_id(&id)?;
    Ok(Json(state.notes.find_metadata_by_id(&id).await?))
}

async fn update_note(
    State(state): State<AppState>,
    payload: Result<Json<UpdateNoteRequest>, JsonRejection>,
) -> Result<Json<Note>, AppError> {
    let Json(request) = payload?;
    let id = parse_note_id(&request.id)?;
    Ok(Json(state.notes.queue_update(&id, &request.content).await?))
}

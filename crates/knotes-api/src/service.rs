//! Note store service: persistence plus per-note write ordering.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError};

use knotes_core::db::{Database, NoteRepository, SqliteNoteRepository};
use knotes_core::{Note, NoteId, NoteMetadata};
use tokio::sync::Mutex;

use crate::error::AppError;

type UpdateLane = Arc<Mutex<()>>;

/// Thread-safe note service shared by all request handlers.
///
/// Updates to the same note are applied one at a time in the order they were
/// queued; updates to different notes don't wait on each other beyond the
/// single database connection.
#[derive(Clone)]
pub struct NoteService {
    db: Arc<Mutex<Database>>,
    update_lanes: Arc<std::sync::Mutex<HashMap<NoteId, UpdateLane>>>,
}

impl NoteService {
    pub fn new(db: Database) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
            update_lanes: Arc::new(std::sync::Mutex::new(HashMap::new())),
        }
    }

    pub async fn find_by_id(&self, id: &NoteId) -> Result<Note, AppError> {
        let db = self.db.lock().await;
        let repo = SqliteNoteRepository::new(db.connection());
        repo.get(id)?.ok_or_else(|| AppError::note_not_found(id))
    }

    pub async fn find_metadata_by_id(&self, id: &NoteId) -> Result<NoteMetadata, AppError> {
        let db = self.db.lock().await;
        let repo = SqliteNoteRepository::new(db.connection());
        repo.metadata(id)?.ok_or_else(|| AppError::note_not_found(id))
    }

    pub async fn exists(&self, id: &NoteId) -> Result<bool, AppError> {
        let db = self.db.lock().await;
        let repo = SqliteNoteRepository::new(db.connection());
        Ok(repo.exists(id)?)
    }

    pub async fn save(&self, content: &str) -> Result<Note, AppError> {
        let db = self.db.lock().await;
        let repo = SqliteNoteRepository::new(db.connection());
        let note = repo.create(content)?;
        tracing::info!("Saving note [{}]", note.id);
        Ok(note)
    }

    /// Apply an update after every earlier update queued for the same note.
    pub async fn queue_update(&self, id: &NoteId, content: &str) -> Result<Note, AppError> {
        if !self.exists(id).await? {
            return Err(AppError::note_not_found(id));
        }

        let lane = self.lane(id);
        let result = {
            let _turn = lane.lock().await;
            self.perform_update(id, content).await
        };
        self.release_lane(id, &lane);
        result
    }

    /// Delete every note with empty content, returning the removed ids.
    pub async fn cleanup(&self) -> Result<Vec<NoteId>, AppError> {
        let db = self.db.lock().await;
        let repo = SqliteNoteRepository::new(db.connection());
        let ids = repo.find_empty()?;

        if !ids.is_empty() {
            let listed = ids.iter().map(NoteId::as_str).collect::<Vec<_>>();
            tracing::info!("Cleaning empty notes [{}]", listed.join(", "));
            repo.delete_many(&ids)?;
        }

        Ok(ids)
    }

    async fn perform_update(&self, id: &NoteId, content: &str) -> Result<Note, AppError> {
        let db = self.db.lock().await;
        let repo = SqliteNoteRepository::new(db.connection());
        tracing::info!("Updating note [{}]", id);
        Ok(repo.update(id, content)?)
    }

    fn lane(&self, id: &NoteId) -> UpdateLane {
        let mut lanes = self
            .update_lanes
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(lanes.entry(id.clone()).or_default())
    }

    fn release_lane(&self, id: &NoteId, lane: &UpdateLane) {
        let mut lanes = self
            .update_lanes
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // Only the map and this caller still hold the lane: nobody is queued behind us.
        let idle = lanes
            .get(id)
            .is_some_and(|current| Arc::ptr_eq(current, lane) && Arc::strong_count(lane) == 2);
        if idle {
            lanes.remove(id);
        }
    }

    #[cfg(test)]
    fn queued_lanes(&self) -> usize {
        self.update_lanes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

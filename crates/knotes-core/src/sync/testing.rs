//! In-process store and view fakes for controller tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::models::{Note, NoteId, NoteMetadata};
use crate::store::{NoteStore, StoreError, StoreResult};
use crate::sync::NoteView;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Create(String),
    Get(String),
    Update(String, String),
    Metadata(String),
}

#[derive(Clone, Default)]
pub struct FakeStore {
    state: Arc<Mutex<FakeStoreState>>,
}

#[derive(Default)]
struct FakeStoreState {
    notes: HashMap<NoteId, Note>,
    calls: Vec<StoreCall>,
    fail_creates: bool,
    fail_gets: bool,
    fail_updates: bool,
    update_delay: Duration,
}

fn unavailable() -> StoreError {
    StoreError::Api {
        status: 503,
        message: "HTTP 503".to_string(),
    }
}

impl FakeStore {
    fn lock(&self) -> MutexGuard<'_, FakeStoreState> {
        self.state.lock().unwrap()
    }

    pub fn insert(&self, content: &str) -> NoteId {
        let note = Note::new(content);
        let id = note.id.clone();
        self.lock().notes.insert(id.clone(), note);
        id
    }

    pub fn content_of(&self, id: &NoteId) -> Option<String> {
        self.lock().notes.get(id).map(|note| note.content.clone())
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    pub fn set_fail_creates(&self, fail: bool) {
        self.lock().fail_creates = fail;
    }

    pub fn set_fail_gets(&self, fail: bool) {
        self.lock().fail_gets = fail;
    }

    pub fn set_fail_updates(&self, fail: bool) {
        self.lock().fail_updates = fail;
    }

    pub fn set_update_delay(&self, delay: Duration) {
        self.lock().update_delay = delay;
    }
}

impl NoteStore for FakeStore {
    async fn create(&self, content: &str) -> StoreResult<Note> {
        let mut state = self.lock();
        state.calls.push(StoreCall::Create(content.to_string()));
        if state.fail_creates {
            return Err(unavailable());
        }

        let note = Note::new(content);
        state.notes.insert(note.id.clone(), note.clone());
        Ok(note)
    }

    async fn get(&self, id: &NoteId) -> StoreResult<Note> {
        let mut state = self.lock();
        state.calls.push(StoreCall::Get(id.to_string()));
        if state.fail_gets {
            return Err(unavailable());
        }

        state
            .notes
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn update(&self, id: &NoteId, content: &str) -> StoreResult<()> {
        let delay = {
            let mut state = self.lock();
            state
                .calls
                .push(StoreCall::Update(id.to_string(), content.to_string()));
            if state.fail_updates {
                return Err(unavailable());
            }
            state.update_delay
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.lock();
        let note = state
            .notes
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        note.content = content.to_string();
        Ok(())
    }

    async fn metadata(&self, id: &NoteId) -> StoreResult<NoteMetadata> {
        let mut state = self.lock();
        state.calls.push(StoreCall::Metadata(id.to_string()));
        state
            .notes
            .get(id)
            .map(Note::metadata)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    SetContent(String),
    Focus,
    ShowNoteId(String),
    HideNoteId,
    ReplaceLocation(String),
}

#[derive(Clone, Default)]
pub struct FakeView {
    events: Arc<Mutex<Vec<ViewEvent>>>,
}

impl FakeView {
    fn push(&self, event: ViewEvent) {
        self.events.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn content(&self) -> Option<String> {
        self.events().into_iter().rev().find_map(|event| match event {
            ViewEvent::SetContent(content) => Some(content),
            _ => None,
        })
    }

    pub fn location(&self) -> Option<String> {
        self.events().into_iter().rev().find_map(|event| match event {
            ViewEvent::ReplaceLocation(path) => Some(path),
            _ => None,
        })
    }

    pub fn shown_id(&self) -> Option<String> {
        self.events().into_iter().rev().find_map(|event| match event {
            ViewEvent::ShowNoteId(id) => Some(Some(id)),
            ViewEvent::HideNoteId => Some(None),
            _ => None,
        })?
    }
}

impl NoteView for FakeView {
    fn set_content(&self, content: &str) {
        self.push(ViewEvent::SetContent(content.to_string()));
    }

    fn focus(&self) {
        self.push(ViewEvent::Focus);
    }

    fn show_note_id(&self, id: &NoteId) {
        self.push(ViewEvent::ShowNoteId(id.to_string()));
    }

    fn hide_note_id(&self) {
        self.push(ViewEvent::HideNoteId);
    }

    fn replace_location(&self, path: &str) {
        self.push(ViewEvent::ReplaceLocation(path.to_string()));
    }
}

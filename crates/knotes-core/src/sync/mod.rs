//! Auto-save controller.
//!
//! [`NoteSyncController`] owns the identity of the note being edited and the
//! last content it sent to the store. Edits are debounced: each call to
//! [`NoteSyncController::on_content_changed`] replaces the pending timer, and
//! only the text present when the editor has been quiet for
//! [`SyncOptions::debounce`] is persisted.
//!
//! The controller never fails outward. A missing or unreachable note degrades
//! to a freshly created one, and failed writes are logged and left for the
//! next edit to resend.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::location::{find_note_token, note_path};
use crate::models::NoteId;
use crate::store::NoteStore;

#[cfg(test)]
mod testing;
mod view;

pub use view::NoteView;

/// Quiet period after the last edit before content is persisted
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncOptions {
    pub debounce: Duration,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

/// Keeps one note's identity and debounce-persists its content.
///
/// Cloning is cheap and clones share the same session. Methods that schedule
/// work must be called from within a tokio runtime.
pub struct NoteSyncController<S, V> {
    inner: Arc<Inner<S, V>>,
}

impl<S, V> Clone for NoteSyncController<S, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct Inner<S, V> {
    store: S,
    view: V,
    options: SyncOptions,
    session: Mutex<Session>,
    /// Read-held by every store write; `flush` takes it exclusively to drain them.
    writes: RwLock<()>,
}

#[derive(Default)]
struct Session {
    note_id: Option<NoteId>,
    /// Content of the most recently issued write (or of the loaded note).
    last_saved_content: String,
    pending: Option<PendingSave>,
    generation: u64,
}

struct PendingSave {
    generation: u64,
    text: String,
    timer: JoinHandle<()>,
}

impl<S: NoteStore, V: NoteView> NoteSyncController<S, V> {
    pub fn new(store: S, view: V) -> Self {
        Self::with_options(store, view, SyncOptions::default())
    }

    pub fn with_options(store: S, view: V, options: SyncOptions) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                view,
                options,
                session: Mutex::new(Session::default()),
                writes: RwLock::new(()),
            }),
        }
    }

    /// Resolve the note for `path`: load it when the path carries an identity
    /// token, otherwise start a new note.
    pub async fn initialize(&self, path: &str) {
        match find_note_token(path) {
            Some(token) => self.load_by_id(token).await,
            None => self.create_new().await,
        }
    }

    /// Record an edit. Cancels the pending save, if any, and schedules a new
    /// one for `text` after the debounce delay.
    pub fn on_content_changed(&self, text: impl Into<String>) {
        let text = text.into();
        let mut session = self.inner.session();

        if let Some(previous) = session.pending.take() {
            previous.timer.abort();
        }

        session.generation += 1;
        let generation = session.generation;
        let inner = Arc::clone(&self.inner);
        let timer = tokio::spawn(async move {
            tokio::time::sleep(inner.options.debounce).await;
            // Held before claiming the text so `flush` can't slip in between.
            let _writing = inner.writes.read().await;
            // A timer that fired is no longer cancellable by later edits.
            if let Some(text) = inner.take_pending(generation) {
                inner.write(text).await;
            }
        });

        session.pending = Some(PendingSave {
            generation,
            text,
            timer,
        });
    }

    /// Write `text` to the store unless it matches the last saved content.
    pub async fn persist(&self, text: impl Into<String>) {
        self.inner.persist(text.into()).await;
    }

    /// Persist the pending edit right away instead of waiting for the timer,
    /// then wait for saves that are already in flight.
    pub async fn flush(&self) {
        let pending = self.inner.session().pending.take();
        if let Some(pending) = pending {
            pending.timer.abort();
            self.inner.persist(pending.text).await;
        }
        let _drained = self.inner.writes.write().await;
    }

    /// Load a note by its identity token, falling back to a new note when it
    /// can't be read.
    pub async fn load_by_id(&self, token: &str) {
        self.inner.load_by_id(token).await;
    }

    /// Start a new, empty note.
    pub async fn create_new(&self) {
        self.inner.create_new().await;
    }

    pub fn current_note_id(&self) -> Option<NoteId> {
        self.inner.session().note_id.clone()
    }

    pub fn last_saved_content(&self) -> String {
        self.inner.session().last_saved_content.clone()
    }

    pub fn has_pending_save(&self) -> bool {
        self.inner.session().pending.is_some()
    }
}

impl<S: NoteStore, V: NoteView> Inner<S, V> {
    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn take_pending(&self, generation: u64) -> Option<String> {
        let mut session = self.session();
        let is_current = session
            .pending
            .as_ref()
            .is_some_and(|pending| pending.generation == generation);
        if is_current {
            session.pending.take().map(|pending| pending.text)
        } else {
            None
        }
    }

    async fn persist(&self, text: String) {
        let _writing = self.writes.read().await;
        self.write(text).await;
    }

    /// Callers must hold a read guard on `writes`.
    async fn write(&self, text: String) {
        let note_id = {
            let mut session = self.session();
            if session.last_saved_content == text {
                tracing::trace!("Content unchanged, skipping save");
                return;
            }
            // Marked saved as soon as the write is issued, whatever its outcome.
            session.last_saved_content.clone_from(&text);
            session.note_id.clone()
        };

        if let Some(id) = note_id {
            match self.store.update(&id, &text).await {
                Ok(()) => tracing::debug!("Auto-saved note: {}", id),
                Err(error) => tracing::error!("Auto-save failed for note {}: {}", id, error),
            }
        } else {
            match self.store.create(&text).await {
                Ok(note) => {
                    tracing::debug!("Created note on first save: {}", note.id);
                    self.adopt_identity(note.id);
                }
                Err(error) => tracing::error!("Auto-save failed to create note: {}", error),
            }
        }
    }

    async fn load_by_id(&self, token: &str) {
        let id = match token.parse::<NoteId>() {
            Ok(id) => id,
            Err(error) => {
                tracing::warn!("{}, creating new note", error);
                return self.create_new().await;
            }
        };

        match self.store.get(&id).await {
            Ok(note) => {
                {
                    let mut session = self.session();
                    session.note_id = Some(note.id.clone());
                    session.last_saved_content.clone_from(&note.content);
                }
                self.view.set_content(&note.content);
                self.view.replace_location(&note_path(&note.id));
                self.view.show_note_id(&note.id);
                tracing::debug!("Loaded note: {}", note.id);
            }
            Err(error) if error.is_not_found() => {
                tracing::warn!("Note with ID {} not found, creating new note", id);
                self.create_new().await;
            }
            Err(error) => {
                tracing::error!(
                    "Failed to load note {}: {}, creating new note instead",
                    id,
                    error
                );
                self.create_new().await;
            }
        }
    }

    async fn create_new(&self) {
        match self.store.create("").await {
            Ok(note) => {
                {
                    let mut session = self.session();
                    session.note_id = Some(note.id.clone());
                    session.last_saved_content.clear();
                }
                self.view.set_content("");
                self.view.focus();
                self.view.replace_location(&note_path(&note.id));
                self.view.show_note_id(&note.id);
                tracing::debug!("Created new note: {}", note.id);
            }
            Err(error) => {
                tracing::error!("Failed to create new note: {}", error);
                if self.session().note_id.is_none() {
                    self.view.hide_note_id();
                }
            }
        }
    }

    fn adopt_identity(&self, id: NoteId) {
        self.session().note_id = Some(id.clone());
        self.view.replace_location(&note_path(&id));
        self.view.show_note_id(&id);
    }
}

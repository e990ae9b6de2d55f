//! Effects the auto-save controller performs on its host UI.

use crate::models::NoteId;

/// UI collaborators driven by [`NoteSyncController`](super::NoteSyncController).
///
/// Every method is a fire-and-forget effect; the controller never reads back
/// from the view. Implementations must be cheap and must not block.
pub trait NoteView: Send + Sync + 'static {
    /// Replace the editable content
    fn set_content(&self, content: &str);

    /// Move input focus to the editable content
    fn focus(&self);

    /// Show the current note identity
    fn show_note_id(&self, id: &NoteId);

    /// Hide the identity display
    fn hide_note_id(&self);

    /// Replace the visible location in place, without navigating
    fn replace_location(&self, path: &str);
}

use std::io::{self, IsTerminal, Write};
use std::sync::{Mutex, PoisonError};

use knotes_core::config::ClientConfig;
use knotes_core::location::note_url;
use knotes_core::{NoteId, NoteStore, NoteSyncController, NoteView};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::commands::common::connect;
use crate::error::CliError;

/// Reports controller effects as status lines on a terminal stream.
pub struct TerminalView<W> {
    base_url: String,
    out: Mutex<W>,
}

impl<W: Write> TerminalView<W> {
    pub fn new(base_url: impl Into<String>, out: W) -> Self {
        Self {
            base_url: base_url.into(),
            out: Mutex::new(out),
        }
    }

    fn write_line(&self, line: &str) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        // Status output is best effort.
        let _ = writeln!(out, "{line}");
    }
}

impl<W: Write + Send + 'static> NoteView for TerminalView<W> {
    fn set_content(&self, content: &str) {
        if !content.is_empty() {
            self.write_line(content);
        }
    }

    fn focus(&self) {
        tracing::trace!("Editor ready for input");
    }

    fn show_note_id(&self, id: &NoteId) {
        self.write_line(&format!("Editing note {id}"));
    }

    fn hide_note_id(&self) {
        self.write_line("Note not saved yet");
    }

    fn replace_location(&self, path: &str) {
        self.write_line(&format!(
            "Link: {}{path}",
            self.base_url.trim_end_matches('/')
        ));
    }
}

pub async fn run_open(target: Option<&str>, config: &ClientConfig) -> Result<(), CliError> {
    let store = connect(config)?;
    let view = TerminalView::new(config.server_url.as_str(), io::stderr());
    let controller = NoteSyncController::with_options(store, view, config.sync_options());

    controller.initialize(target.unwrap_or("/")).await;

    if io::stdin().is_terminal() {
        eprintln!("Type to append lines; Ctrl-D saves and exits.");
    }
    edit_from_lines(&controller, BufReader::new(tokio::io::stdin())).await?;

    let id = controller
        .current_note_id()
        .ok_or_else(|| CliError::NoteUnavailable(config.server_url.clone()))?;
    println!("{}", note_url(&config.server_url, &id));
    Ok(())
}

/// Feed each line from `reader` to the controller as an edit that appends to
/// the note, then flush once input ends.
pub async fn edit_from_lines<S, V, R>(
    controller: &NoteSyncController<S, V>,
    reader: R,
) -> io::Result<()>
where
    S: NoteStore,
    V: NoteView,
    R: AsyncBufRead + Unpin,
{
    let mut buffer = controller.last_saved_content();
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        append_line(&mut buffer, &line);
        controller.on_content_changed(buffer.clone());
    }

    controller.flush().await;
    Ok(())
}

pub fn append_line(buffer: &mut String, line: &str) {
    if !buffer.is_empty() {
        buffer.push('\n');
    }
    buffer.push_str(line);
}

use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use clap::Parser;
use knotes_core::store::StoreResult;
use knotes_core::{
    Note, NoteId, NoteMetadata, NoteStore, NoteSyncController, NoteView, StoreError,
};
use pretty_assertions::assert_eq;

use crate::cli::{Cli, Commands, CompletionShell};
use crate::commands::common::{format_timestamp, resolve_note_id};
use crate::commands::completions::{render_completions, run_completions};
use crate::commands::info::format_metadata_lines;
use crate::commands::open::{append_line, edit_from_lines, TerminalView};
use crate::error::CliError;

const TOKEN: &str = "01KDECFWYDMS857DZMCR680MCY";

#[derive(Clone, Default)]
struct MemoryStore {
    notes: Arc<Mutex<HashMap<NoteId, Note>>>,
}

impl MemoryStore {
    fn insert(&self, content: &str) -> NoteId {
        let note = Note::new(content);
        let id = note.id.clone();
        self.notes.lock().unwrap().insert(id.clone(), note);
        id
    }

    fn content_of(&self, id: &NoteId) -> Option<String> {
        self.notes
            .lock()
            .unwrap()
            .get(id)
            .map(|note| note.content.clone())
    }
}

impl NoteStore for MemoryStore {
    async fn create(&self, content: &str) -> StoreResult<Note> {
        let note = Note::new(content);
        self.notes
            .lock()
            .unwrap()
            .insert(note.id.clone(), note.clone());
        Ok(note)
    }

    async fn get(&self, id: &NoteId) -> StoreResult<Note> {
        self.notes
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn update(&self, id: &NoteId, content: &str) -> StoreResult<()> {
        let mut notes = self.notes.lock().unwrap();
        let note = notes
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        note.content = content.to_string();
        Ok(())
    }

    async fn metadata(&self, id: &NoteId) -> StoreResult<NoteMetadata> {
        self.get(id).await.map(|note| note.metadata())
    }
}

fn quiet_view() -> TerminalView<io::Sink> {
    TerminalView::new("http://localhost:8080", io::sink())
}

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn cli_parses_open_with_global_server() {
    let cli = Cli::try_parse_from([
        "knotes",
        "open",
        TOKEN,
        "--server",
        "http://localhost:9000",
    ])
    .unwrap();

    assert_eq!(cli.server.as_deref(), Some("http://localhost:9000"));
    assert!(matches!(cli.command, Commands::Open { target: Some(ref t) } if t == TOKEN));
}

#[test]
fn cli_open_target_is_optional() {
    let cli = Cli::try_parse_from(["knotes", "open"]).unwrap();
    assert!(matches!(cli.command, Commands::Open { target: None }));
    assert!(Cli::try_parse_from(["knotes", "show"]).is_err());
}

#[test]
fn cli_parses_show_json_flag() {
    let cli = Cli::try_parse_from(["knotes", "show", TOKEN, "--json"]).unwrap();
    assert!(matches!(cli.command, Commands::Show { json: true, .. }));
}

#[test]
fn resolve_note_id_accepts_links_paths_and_bare_ids() {
    for raw in [
        TOKEN.to_string(),
        format!("/{TOKEN}"),
        format!("https://notes.example.com/{TOKEN}?ref=share"),
        format!("  {TOKEN}\n"),
    ] {
        assert_eq!(resolve_note_id(&raw).unwrap().as_str(), TOKEN);
    }
}

#[test]
fn resolve_note_id_rejects_other_input() {
    let err = resolve_note_id("not-a-note").unwrap_err();
    assert!(matches!(err, CliError::InvalidNoteId(ref raw) if raw == "not-a-note"));
    assert!(resolve_note_id("/").is_err());
}

#[test]
fn format_timestamp_renders_rfc3339() {
    assert_eq!(format_timestamp(0), "1970-01-01T00:00:00+00:00");
    assert_eq!(format_timestamp(1_700_000_000_000), "2023-11-14T22:13:20+00:00");
}

#[test]
fn metadata_lines_include_share_link() {
    let metadata = NoteMetadata {
        id: TOKEN.parse().unwrap(),
        created_at: 0,
        modified_at: 1_000,
    };

    let lines = format_metadata_lines(&metadata, "http://localhost:8080/");

    assert_eq!(
        lines,
        vec![
            format!("id:       {TOKEN}"),
            format!("link:     http://localhost:8080/{TOKEN}"),
            "created:  1970-01-01T00:00:00+00:00".to_string(),
            "modified: 1970-01-01T00:00:01+00:00".to_string(),
        ]
    );
}

#[test]
fn append_line_joins_with_newlines() {
    let mut buffer = String::new();
    append_line(&mut buffer, "first");
    append_line(&mut buffer, "second");
    assert_eq!(buffer, "first\nsecond");
}

#[test]
fn terminal_view_reports_status_lines() {
    let out = SharedBuffer::default();
    let view = TerminalView::new("http://localhost:8080/", out.clone());
    let id: NoteId = TOKEN.parse().unwrap();

    view.set_content("");
    view.set_content("stored text");
    view.focus();
    view.replace_location(&format!("/{id}"));
    view.show_note_id(&id);
    view.hide_note_id();

    assert_eq!(
        out.text(),
        format!(
            "stored text\nLink: http://localhost:8080/{TOKEN}\nEditing note {TOKEN}\nNote not saved yet\n"
        )
    );
}

#[tokio::test]
async fn stdin_lines_are_saved_to_new_note() {
    let store = MemoryStore::default();
    let controller = NoteSyncController::new(store.clone(), quiet_view());
    controller.initialize("/").await;

    edit_from_lines(&controller, &b"one\ntwo\n"[..]).await.unwrap();

    let id = controller.current_note_id().unwrap();
    assert_eq!(store.content_of(&id).as_deref(), Some("one\ntwo"));
    assert!(!controller.has_pending_save());
}

#[tokio::test]
async fn stdin_lines_append_to_existing_note() {
    let store = MemoryStore::default();
    let id = store.insert("existing");
    let controller = NoteSyncController::new(store.clone(), quiet_view());
    controller.initialize(&format!("/{id}")).await;

    edit_from_lines(&controller, &b"more\n"[..]).await.unwrap();

    assert_eq!(controller.current_note_id(), Some(id.clone()));
    assert_eq!(store.content_of(&id).as_deref(), Some("existing\nmore"));
}

#[tokio::test]
async fn empty_stdin_leaves_note_untouched() {
    let store = MemoryStore::default();
    let id = store.insert("keep");
    let controller = NoteSyncController::new(store.clone(), quiet_view());
    controller.initialize(&format!("/{id}")).await;

    edit_from_lines(&controller, &b""[..]).await.unwrap();

    assert_eq!(store.content_of(&id).as_deref(), Some("keep"));
}

fn completion_script(shell: CompletionShell) -> String {
    String::from_utf8(render_completions(shell)).unwrap()
}

#[test]
fn completions_use_each_shell_format() {
    assert!(completion_script(CompletionShell::Bash).contains("complete -F _knotes"));
    assert!(completion_script(CompletionShell::Zsh).starts_with("#compdef knotes"));
    assert!(completion_script(CompletionShell::Fish).contains("complete -c knotes"));
}

#[test]
fn completions_cover_subcommands_and_global_flag() {
    for shell in [
        CompletionShell::Bash,
        CompletionShell::Zsh,
        CompletionShell::Fish,
    ] {
        let script = completion_script(shell);
        for word in ["open", "new", "show", "info", "completions", "server"] {
            assert!(script.contains(word), "{shell:?} completions lack {word}");
        }
    }
}

#[test]
fn completions_can_be_written_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("knotes.bash");

    run_completions(CompletionShell::Bash, Some(&path)).unwrap();

    let script = std::fs::read_to_string(&path).unwrap();
    assert!(script.contains("open"));
}

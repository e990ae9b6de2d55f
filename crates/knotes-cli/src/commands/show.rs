use knotes_core::config::ClientConfig;
use knotes_core::NoteStore;

use crate::commands::common::{connect, resolve_note_id};
use crate::error::CliError;

pub async fn run_show(raw_id: &str, as_json: bool, config: &ClientConfig) -> Result<(), CliError> {
    let id = resolve_note_id(raw_id)?;
    let note = connect(config)?.get(&id).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        println!("{}", note.content);
    }

    Ok(())
}

use knotes_core::config::ClientConfig;
use knotes_core::NoteStore;

use crate::commands::common::connect;
use crate::error::CliError;

pub async fn run_new(config: &ClientConfig) -> Result<(), CliError> {
    let store = connect(config)?;
    let note = store.create("").await?;

    println!("{}", note.id);
    Ok(())
}

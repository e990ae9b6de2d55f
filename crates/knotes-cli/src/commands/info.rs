use knotes_core::config::ClientConfig;
use knotes_core::location::note_url;
use knotes_core::{NoteMetadata, NoteStore};

use crate::commands::common::{connect, format_timestamp, resolve_note_id};
use crate::error::CliError;

pub async fn run_info(raw_id: &str, as_json: bool, config: &ClientConfig) -> Result<(), CliError> {
    let id = resolve_note_id(raw_id)?;
    let metadata = connect(config)?.metadata(&id).await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&metadata)?);
    } else {
        for line in format_metadata_lines(&metadata, &config.server_url) {
            println!("{line}");
        }
    }

    Ok(())
}

pub fn format_metadata_lines(metadata: &NoteMetadata, server_url: &str) -> Vec<String> {
    vec![
        format!("id:       {}", metadata.id),
        format!("link:     {}", note_url(server_url, &metadata.id)),
        format!("created:  {}", format_timestamp(metadata.created_at)),
        format!("modified: {}", format_timestamp(metadata.modified_at)),
    ]
}

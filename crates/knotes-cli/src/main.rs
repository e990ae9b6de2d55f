//! knotes CLI - shareable scratch notes from the terminal
//!
//! Pipe or type text into a note and get back a link to share it.

mod cli;
mod commands;
mod error;
#[cfg(test)]
mod tests;

use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands::common::load_config;
use crate::commands::completions::run_completions;
use crate::commands::info::run_info;
use crate::commands::new::run_new;
use crate::commands::open::run_open;
use crate::commands::show::run_show;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("knotes=info".parse().expect("valid directive")),
        )
        .init();

    let cli = Cli::parse();
    let server = cli.server.as_deref();

    match cli.command {
        Commands::Open { target } => run_open(target.as_deref(), &load_config(server)?).await,
        Commands::New => run_new(&load_config(server)?).await,
        Commands::Show { id, json } => run_show(&id, json, &load_config(server)?).await,
        Commands::Info { id, json } => run_info(&id, json, &load_config(server)?).await,
        Commands::Completions { shell, output } => run_completions(shell, output.as_deref()),
    }
}

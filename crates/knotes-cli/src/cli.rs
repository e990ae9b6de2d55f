use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "knotes")]
#[command(about = "Shareable scratch notes from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Note store URL (overrides KNOTES_SERVER_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub server: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open a note and auto-save lines typed on stdin into it
    Open {
        /// Share link, path, or note ID (a new note when omitted)
        target: Option<String>,
    },
    /// Create an empty note and print its ID
    New,
    /// Print a note's content
    Show {
        /// Share link, path, or note ID
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a note's timestamps
    Info {
        /// Share link, path, or note ID
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

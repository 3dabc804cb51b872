use std::path::PathBuf;

use clap::Parser;

use crate::Commands;

/// Main CLI application arguments and command structure
#[derive(Parser)]
#[clap(
    version = "0.1.0",
    about = "Study notes: create, tag, filter, and export short text notes"
)]
pub struct Cli {
    /// Path to the note store file
    #[clap(short, long, value_parser)]
    pub store: Option<PathBuf>,

    /// Verbose output mode
    #[clap(short, long)]
    pub verbose: bool,

    /// Subcommands for the study-notes application
    #[clap(subcommand)]
    pub command: Commands,
}

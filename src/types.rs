//! Shared types for the study-notes application.
//!
//! This module holds the crate-wide Result alias and the CLI subcommand
//! definitions.

use std::path::PathBuf;

use clap::Subcommand;

use crate::{NoteError, NoteId};

/// A specialized Result type for study-notes operations.
pub type Result<T> = std::result::Result<T, NoteError>;

/// Available subcommands for the study-notes application
#[derive(Subcommand)]
pub enum Commands {
    /// Create a new note
    New {
        /// Title of the note
        #[clap(short = 'T', long)]
        title: Option<String>,

        /// Body text of the note
        #[clap(short, long)]
        body: Option<String>,

        /// Tags to associate with the note (whitespace-separated)
        #[clap(short, long)]
        tags: Option<String>,
    },

    /// List notes with optional filtering
    List {
        /// Keyword matched case-insensitively against title and body
        #[clap(short, long)]
        search: Option<String>,

        /// Only show notes carrying this exact tag
        #[clap(short, long)]
        tag: Option<String>,

        /// Format output as JSON
        #[clap(short, long)]
        json: bool,
    },

    /// View a note by ID
    View {
        /// ID of the note to view
        id: NoteId,

        /// Format output as raw JSON
        #[clap(short, long)]
        json: bool,
    },

    /// Edit an existing note
    Edit {
        /// ID of the note to edit
        id: NoteId,

        /// New title for the note
        #[clap(short = 'T', long)]
        title: Option<String>,

        /// New body text for the note
        #[clap(short, long)]
        body: Option<String>,

        /// Replacement tags (whitespace-separated)
        #[clap(short, long)]
        tags: Option<String>,
    },

    /// Delete a note by ID
    Delete {
        /// ID of the note to delete
        id: NoteId,

        /// Skip confirmation prompt
        #[clap(short, long)]
        force: bool,
    },

    /// Export a note to a text file
    Export {
        /// ID of the note to export
        id: NoteId,

        /// Path for the exported file (defaults to "<title>.txt")
        #[clap(short, long)]
        output: Option<PathBuf>,
    },

    /// List all distinct tags across notes
    Tags,
}

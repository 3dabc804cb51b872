//! Error types for the study-notes application.
//!
//! This module defines custom error types that categorize different failures
//! that can occur during note management operations.

use std::io;

use thiserror::Error;

use crate::note::NoteId;

/// The main error type for the study-notes application.
#[derive(Error, Debug)]
pub enum NoteError {
    /// Errors related to file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Note was not found when performing an operation.
    #[error("Note not found: {id}")]
    NoteNotFound { id: NoteId },

    /// Save attempted with both title and body empty.
    #[error("A note needs a title or a body before it can be saved")]
    EmptyNote,

    /// A content-mode operation was invoked with no note open.
    #[error("No note is currently open")]
    NoOpenNote,

    /// A commit was attempted outside of edit mode.
    #[error("No edit in progress")]
    NoEditInProgress,

    /// The storage backend failed to read or write the note collection.
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// Errors related to configuration.
    #[error("Configuration error: {message}")]
    Config { message: String },
}

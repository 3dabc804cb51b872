//! Core data structures for the study-notes application.
//!
//! This module contains the note entity itself plus the small data-layer
//! rules around it: placeholder defaults and tag splitting.

use serde::{Deserialize, Serialize};

/// Unique identifier for a note.
///
/// Integer-valued, derived from the creation timestamp in milliseconds.
/// Callers must not assume anything beyond "later creation yields a
/// numerically greater id" — see [`crate::NoteStore::next_id`].
pub type NoteId = i64;

/// Placeholder title applied when a note is saved with an empty title.
pub const UNTITLED: &str = "Untitled";

/// Placeholder body applied when a note is saved with an empty body.
pub const NO_CONTENT: &str = "No content";

/// Represents a single note in our system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier for the note
    pub id: NoteId,
    /// Note title
    pub title: String,
    /// Note content as plain text
    pub body: String,
    /// Tags for organization
    pub tags: Vec<String>,
    /// Last modification time, milliseconds since epoch
    pub updated: i64,
}

impl Note {
    /// Builds a note from trimmed user input, applying the placeholder
    /// defaults for an empty title or body.
    pub fn new(id: NoteId, title: &str, body: &str, tags: Vec<String>, updated: i64) -> Self {
        let title = title.trim();
        let body = body.trim();

        Note {
            id,
            title: if title.is_empty() {
                UNTITLED.to_string()
            } else {
                title.to_string()
            },
            body: if body.is_empty() {
                NO_CONTENT.to_string()
            } else {
                body.to_string()
            },
            tags,
            updated,
        }
    }
}

/// Splits a whitespace-delimited tag field into individual tags.
///
/// Empty strings never survive the split; duplicates within a single
/// note are kept as entered.
pub fn split_tags(input: &str) -> Vec<String> {
    input.split_whitespace().map(str::to_string).collect()
}

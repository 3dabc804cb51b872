//! Application configuration settings.

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::{NoteError, Result};

/// Application configuration settings.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the JSON document holding the note collection
    pub store_path: PathBuf,
}

impl Config {
    /// Resolves the store location: an explicit override wins, otherwise
    /// the platform data directory for the application.
    pub fn resolve(store_override: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = store_override {
            return Ok(Self { store_path: path });
        }

        let dirs = ProjectDirs::from("", "", "study-notes").ok_or_else(|| NoteError::Config {
            message: "Could not determine a data directory for the note store".to_string(),
        })?;

        Ok(Self {
            store_path: dirs.data_dir().join("study_notes.json"),
        })
    }
}

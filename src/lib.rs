//! Study notes panel core library
//!
//! This library provides the note store, view-state machine, and formatting
//! utilities behind a small note-taking panel: create, view, edit, tag,
//! filter, and export short text notes persisted as a single JSON document.

mod cli;
mod config;
mod errors;
mod format;
mod note;
mod storage;
mod types;
mod view;

// Re-export key components
pub use cli::*;
pub use config::*;
pub use errors::*;
pub use format::*;
pub use note::*;
pub use storage::*;
pub use types::*;
pub use view::*;

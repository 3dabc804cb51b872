//! CLI module for the study-notes application
//!
//! This module handles the command-line interface for interacting with
//! the note panel core.

mod app;
mod main;

pub use app::*;
pub use main::*;

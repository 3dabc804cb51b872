//! Command handling for the study-notes CLI.
//!
//! Every command is routed through the [`ViewController`] so the view-state
//! machine is the single path to the store.

use std::{
    fs,
    io::{stdin, stdout, Write},
    path::PathBuf,
};

use crate::{
    format_timestamp, Commands, Note, NoteError, NoteId, Result, ViewController,
};

/// CLI application handler - maps commands onto view-controller actions.
pub struct App {
    controller: ViewController,
}

impl App {
    pub fn new(controller: ViewController) -> Self {
        Self { controller }
    }

    /// Run the CLI application with the given command
    pub fn run(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::New { title, body, tags } => self.handle_new(title, body, tags),

            Commands::List { search, tag, json } => self.handle_list(search, tag, json),

            Commands::View { id, json } => self.handle_view(id, json),

            Commands::Edit {
                id,
                title,
                body,
                tags,
            } => self.handle_edit(id, title, body, tags),

            Commands::Delete { id, force } => self.handle_delete(id, force),

            Commands::Export { id, output } => self.handle_export(id, output),

            Commands::Tags => self.handle_tags(),
        }
    }

    fn handle_new(
        &mut self,
        title: Option<String>,
        body: Option<String>,
        tags: Option<String>,
    ) -> Result<()> {
        self.controller.create_new();

        let draft = self.controller.draft_mut();
        draft.title = title.unwrap_or_default();
        draft.body = body.unwrap_or_default();
        draft.tags = tags.unwrap_or_default();

        let id = self.controller.commit_edit()?;
        println!("Note created with ID: {}", id);
        Ok(())
    }

    fn handle_list(
        &mut self,
        search: Option<String>,
        tag: Option<String>,
        json: bool,
    ) -> Result<()> {
        self.controller.set_keyword(search.unwrap_or_default());
        self.controller.set_tag_filter(tag.unwrap_or_default());

        let notes = self.controller.visible_notes();
        if notes.is_empty() {
            println!("No notes found matching the criteria.");
            return Ok(());
        }

        if json {
            let owned: Vec<Note> = notes.iter().map(|n| (*n).clone()).collect();
            println!("{}", serde_json::to_string_pretty(&owned)?);
            return Ok(());
        }

        // Use terminal width for formatting if available
        let term_width = terminal_size::terminal_size()
            .map(|(w, _)| w.0 as usize)
            .unwrap_or(80);

        for (i, note) in notes.iter().enumerate() {
            if i > 0 {
                println!("{}", "-".repeat(term_width.min(50)));
            }

            println!(
                "ID: {} | Updated: {}",
                note.id,
                format_timestamp(note.updated)
            );
            println!("Title: {}", console::style(&note.title).bold());

            if !note.tags.is_empty() {
                let tags = note
                    .tags
                    .iter()
                    .map(|tag| format!("#{}", tag))
                    .collect::<Vec<_>>()
                    .join(" ");
                println!("Tags: {}", console::style(tags).cyan());
            }

            let preview = body_preview(&note.body, 100);
            if !preview.is_empty() {
                println!("{}", preview);
            }
        }

        println!(
            "\nFound {} note{}",
            notes.len(),
            if notes.len() == 1 { "" } else { "s" }
        );
        Ok(())
    }

    fn handle_view(&mut self, id: NoteId, json: bool) -> Result<()> {
        if !self.controller.open(id) {
            return Err(NoteError::NoteNotFound { id });
        }

        // open() guarantees presence
        let note = self
            .controller
            .store()
            .get(id)
            .ok_or(NoteError::NoteNotFound { id })?;

        if json {
            println!("{}", serde_json::to_string_pretty(note)?);
            return Ok(());
        }

        println!("{}", console::style(&note.title).bold());
        if !note.tags.is_empty() {
            println!("Tags: {}", console::style(note.tags.join(" ")).cyan());
        }
        println!("Updated: {}", format_timestamp(note.updated));
        println!("\n{}", note.body);
        Ok(())
    }

    fn handle_edit(
        &mut self,
        id: NoteId,
        title: Option<String>,
        body: Option<String>,
        tags: Option<String>,
    ) -> Result<()> {
        if !self.controller.open(id) {
            return Err(NoteError::NoteNotFound { id });
        }
        self.controller.begin_edit()?;

        // Unspecified fields keep their stored values.
        let draft = self.controller.draft_mut();
        if let Some(new_title) = title {
            draft.title = new_title;
        }
        if let Some(new_body) = body {
            draft.body = new_body;
        }
        if let Some(new_tags) = tags {
            draft.tags = new_tags;
        }

        self.controller.commit_edit()?;
        println!("Note {} updated successfully", id);
        Ok(())
    }

    fn handle_delete(&mut self, id: NoteId, force: bool) -> Result<()> {
        if !self.controller.open(id) {
            return Err(NoteError::NoteNotFound { id });
        }

        let note = self
            .controller
            .store()
            .get(id)
            .cloned()
            .ok_or(NoteError::NoteNotFound { id })?;

        let confirmed = force || Self::confirm_deletion(&note)?;
        if self.controller.delete_active(confirmed)? {
            println!(
                "Note '{}' ({}) has been permanently deleted.",
                note.title, note.id
            );
        } else {
            println!("Deletion cancelled.");
        }
        Ok(())
    }

    /// Shows note details and prompts for confirmation on stdin.
    fn confirm_deletion(note: &Note) -> Result<bool> {
        println!("You are about to delete the following note:");
        println!("ID:      {}", note.id);
        println!("Title:   {}", note.title);
        println!("Tags:    {}", note.tags.join(", "));
        println!("Updated: {}", format_timestamp(note.updated));

        let preview = body_preview(&note.body, 100);
        if !preview.is_empty() {
            println!("\nContent preview:\n{}", preview);
        }

        println!("\nThis action cannot be undone!");
        print!("Are you sure you want to delete this note? [y/N]: ");
        stdout().flush().map_err(NoteError::Io)?;

        let mut input = String::new();
        stdin().read_line(&mut input).map_err(NoteError::Io)?;

        let input = input.trim().to_lowercase();
        Ok(input == "y" || input == "yes")
    }

    fn handle_export(&mut self, id: NoteId, output: Option<PathBuf>) -> Result<()> {
        if !self.controller.open(id) {
            return Err(NoteError::NoteNotFound { id });
        }

        let export = self.controller.export_active()?;
        let path = output.unwrap_or_else(|| PathBuf::from(&export.file_name));

        fs::write(&path, export.contents)?;
        println!("Exported note {} to {}", id, path.display());
        Ok(())
    }

    fn handle_tags(&self) -> Result<()> {
        let tags = self.controller.store().tag_set();
        if tags.is_empty() {
            println!("No tags yet.");
            return Ok(());
        }
        for tag in tags {
            println!("{}", tag);
        }
        Ok(())
    }
}

/// First non-empty line of a body, truncated to `max_len` characters.
fn body_preview(body: &str, max_len: usize) -> String {
    let first_line = body
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("");

    if first_line.chars().count() <= max_len {
        first_line.to_string()
    } else {
        let truncated: String = first_line.chars().take(max_len).collect();
        format!("{}...", truncated)
    }
}

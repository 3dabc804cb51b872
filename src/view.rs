//! View-state machine for the note panel.
//!
//! [`ViewController`] maps user intent onto [`NoteStore`] operations and
//! owns the UI mode, the active note, the edit draft, and the filtered
//! list, independent of any rendering surface. The dual-purpose save
//! button of the panel is split into explicit [`ViewController::begin_edit`]
//! and [`ViewController::commit_edit`] operations.

use chrono::Utc;
use log::{debug, info};

use crate::{
    export_file_name, split_tags, to_export_document, Note, NoteError, NoteId, NoteStore, Result,
};

/// Top-level UI state. `Read` and `Edit` are the two content-mode
/// sub-states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    List,
    Read,
    Edit,
}

/// The mutable input fields of content mode. Tags are held as the raw
/// whitespace-delimited input string until commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub tags: String,
    pub body: String,
}

impl Draft {
    fn from_note(note: &Note) -> Self {
        Draft {
            title: note.title.clone(),
            tags: note.tags.join(" "),
            body: note.body.clone(),
        }
    }
}

/// An exported note, ready to be handed to a save-as-file collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub contents: String,
}

/// Owns UI mode and state, mediates user actions into store calls, and
/// keeps the filtered list current.
pub struct ViewController {
    store: NoteStore,
    mode: Mode,
    active: Option<NoteId>,
    draft: Draft,
    keyword: String,
    tag_filter: String,
    visible: Vec<NoteId>,
}

impl ViewController {
    /// Wraps an already-loaded store and starts in list mode.
    pub fn new(store: NoteStore) -> Self {
        let mut controller = Self {
            store,
            mode: Mode::List,
            active: None,
            draft: Draft::default(),
            keyword: String::new(),
            tag_filter: String::new(),
            visible: Vec::new(),
        };
        controller.refresh_list();
        controller
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn active_id(&self) -> Option<NoteId> {
        self.active
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Mutable access to the content-mode input fields. The fields are
    /// only read back on commit.
    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    /// Starts a new note: no active reference, empty fields, edit mode.
    /// The store is untouched until commit.
    pub fn create_new(&mut self) {
        debug!("Starting a new note draft");
        self.active = None;
        self.draft = Draft::default();
        self.mode = Mode::Edit;
    }

    /// Opens an existing note in read mode, populating the fields from
    /// its stored values. An unknown id is a silent no-op and returns
    /// false; the triggering list entry is assumed stale.
    pub fn open(&mut self, id: NoteId) -> bool {
        let Some(note) = self.store.get(id) else {
            debug!("Open of note {}: not found, staying put", id);
            return false;
        };

        let draft = Draft::from_note(note);
        self.draft = draft;
        self.active = Some(id);
        self.mode = Mode::Read;
        true
    }

    /// Makes the open note's fields mutable.
    pub fn begin_edit(&mut self) -> Result<()> {
        if self.mode != Mode::Read || self.active.is_none() {
            return Err(NoteError::NoOpenNote);
        }
        self.mode = Mode::Edit;
        Ok(())
    }

    /// Validates and saves the draft, then shows the saved note in read
    /// mode.
    ///
    /// A draft with both title and body empty fails with
    /// [`NoteError::EmptyNote`]; nothing is persisted and the mode does
    /// not change. The same holds for a persistence failure: the draft
    /// stays editable so no input is silently dropped.
    pub fn commit_edit(&mut self) -> Result<NoteId> {
        if self.mode != Mode::Edit {
            return Err(NoteError::NoEditInProgress);
        }

        let title = self.draft.title.trim().to_string();
        let body = self.draft.body.trim().to_string();
        if title.is_empty() && body.is_empty() {
            return Err(NoteError::EmptyNote);
        }

        let tags = split_tags(&self.draft.tags);
        let now = Utc::now().timestamp_millis();
        let id = match self.active {
            Some(id) => id,
            None => self.store.next_id(),
        };

        self.store.upsert(Note::new(id, &title, &body, tags, now))?;
        info!("Saved note {}", id);

        self.active = Some(id);
        self.mode = Mode::Read;
        if let Some(saved) = self.store.get(id) {
            self.draft = Draft::from_note(saved);
        }
        self.refresh_list();
        Ok(id)
    }

    /// Abandons the current edit or leaves content mode.
    ///
    /// Cancelling an edit of an existing note restores the stored values
    /// and returns to read mode; cancelling a never-saved draft, or
    /// cancelling from read mode, returns to the list.
    pub fn cancel(&mut self) {
        match (self.mode, self.active) {
            (Mode::Edit, Some(id)) => {
                if !self.open(id) {
                    self.show_list();
                }
            }
            _ => self.show_list(),
        }
    }

    /// Deletes the active note once the user has confirmed.
    ///
    /// Returns whether a note was deleted: a declined confirmation or a
    /// missing active note leave everything as it was.
    pub fn delete_active(&mut self, confirmed: bool) -> Result<bool> {
        let Some(id) = self.active else {
            return Ok(false);
        };
        if !confirmed {
            debug!("Deletion of note {} declined", id);
            return Ok(false);
        }

        self.store.delete(id)?;
        self.show_list();
        Ok(true)
    }

    /// Serializes the active note into an exportable text file. Does not
    /// change mode or mutate the note.
    pub fn export_active(&self) -> Result<ExportFile> {
        let id = self.active.ok_or(NoteError::NoOpenNote)?;
        let note = self.store.get(id).ok_or(NoteError::NoteNotFound { id })?;

        Ok(ExportFile {
            file_name: export_file_name(note),
            contents: to_export_document(note),
        })
    }

    /// Updates the free-text search keyword and recomputes the list.
    pub fn set_keyword(&mut self, keyword: impl Into<String>) {
        self.keyword = keyword.into();
        self.refresh_list();
    }

    /// Updates the single-select tag filter and recomputes the list.
    pub fn set_tag_filter(&mut self, tag: impl Into<String>) {
        self.tag_filter = tag.into();
        self.refresh_list();
    }

    /// The currently visible notes under the active filters, newest-first.
    pub fn visible_notes(&self) -> Vec<&Note> {
        self.visible
            .iter()
            .filter_map(|id| self.store.get(*id))
            .collect()
    }

    fn show_list(&mut self) {
        self.active = None;
        self.draft = Draft::default();
        self.mode = Mode::List;
        self.refresh_list();
    }

    fn refresh_list(&mut self) {
        self.visible = self
            .store
            .filter(&self.keyword, &self.tag_filter)
            .iter()
            .map(|n| n.id)
            .collect();
    }
}

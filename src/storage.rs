//! Persistence and the in-memory note collection.
//!
//! The persisted contract is a single JSON document holding the key
//! `studyNotes` mapped to the full ordered note array. [`NoteStore`] owns
//! the in-memory working set and mediates every read and write through a
//! [`StorageBackend`].

use std::{
    cell::{Cell, RefCell},
    collections::BTreeSet,
    fs,
    io::Write,
    path::{Path, PathBuf},
    rc::Rc,
};

use chrono::Utc;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::{Note, NoteError, NoteId, Result};

/// Key under which the note collection is persisted.
pub const STORE_KEY: &str = "studyNotes";

/// The persisted document: one named record holding the complete note array.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(rename = "studyNotes", default)]
    study_notes: Vec<Note>,
}

/// Host key-value persistence boundary.
///
/// `read` returns `None` when no document has ever been written, which the
/// store treats the same as an empty collection. Writes always carry the
/// complete note set; there is no partial persistence.
pub trait StorageBackend {
    fn read(&self) -> Result<Option<Vec<Note>>>;
    fn write(&self, notes: &[Note]) -> Result<()>;
}

/// File-backed storage: the document is kept as pretty-printed JSON and
/// replaced atomically on every write via a temp-file rename.
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl StorageBackend for JsonFileBackend {
    fn read(&self) -> Result<Option<Vec<Note>>> {
        if !self.path.exists() {
            debug!("No store document at {}, starting empty", self.path.display());
            return Ok(None);
        }

        let raw = fs::read_to_string(&self.path)?;
        let doc: StoreDocument = serde_json::from_str(&raw)?;
        debug!(
            "Read {} notes from {}",
            doc.study_notes.len(),
            self.path.display()
        );
        Ok(Some(doc.study_notes))
    }

    fn write(&self, notes: &[Note]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                debug!("Creating store directory: {}", parent.display());
                fs::create_dir_all(parent)?;
            }
        }

        // Write to a temporary file in the same directory, then rename over
        // the document so readers never observe a half-written store.
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut temp_file = NamedTempFile::new_in(dir)?;

        let doc = StoreDocument {
            study_notes: notes.to_vec(),
        };
        let json = serde_json::to_string_pretty(&doc)?;

        temp_file.write_all(json.as_bytes())?;
        temp_file.flush()?;
        temp_file.persist(&self.path).map_err(|e| {
            warn!("Failed to persist store document: {}", e.error);
            NoteError::Io(e.error)
        })?;

        debug!("Wrote {} notes to {}", notes.len(), self.path.display());
        Ok(())
    }
}

/// In-memory storage backend.
///
/// Stands in for the host key-value store in tests; clones share the same
/// underlying document so a test can inspect what the store persisted.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    document: Rc<RefCell<Option<Vec<Note>>>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last persisted note array, if any write has happened.
    pub fn stored(&self) -> Option<Vec<Note>> {
        self.document.borrow().clone()
    }

    /// Makes every subsequent write fail, for persistence-failure tests.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self) -> Result<Option<Vec<Note>>> {
        Ok(self.document.borrow().clone())
    }

    fn write(&self, notes: &[Note]) -> Result<()> {
        if self.fail_writes.get() {
            return Err(NoteError::Storage {
                message: "simulated write failure".to_string(),
            });
        }
        *self.document.borrow_mut() = Some(notes.to_vec());
        Ok(())
    }
}

/// Single source of truth for the note collection and its persistence.
///
/// The collection is kept newest-first. Every mutation persists the full
/// set before the in-memory working set changes, so a failed write leaves
/// memory and storage consistent.
pub struct NoteStore {
    backend: Box<dyn StorageBackend>,
    notes: Vec<Note>,
}

impl NoteStore {
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Self {
            backend,
            notes: Vec::new(),
        }
    }

    /// Loads the persisted collection into the working set.
    ///
    /// A store that has never been written yields the empty collection; a
    /// document that exists but cannot be read or parsed is an error.
    ///
    /// Returns the number of notes loaded.
    pub fn load(&mut self) -> Result<usize> {
        let notes = self.backend.read()?.unwrap_or_default();
        info!("Loaded {} notes", notes.len());
        self.notes = notes;
        Ok(self.notes.len())
    }

    /// Inserts or replaces a note and persists the collection.
    ///
    /// An existing id is replaced in place, preserving its list position;
    /// a new note goes to the front (newest-first ordering).
    pub fn upsert(&mut self, note: Note) -> Result<()> {
        let mut next = self.notes.clone();
        match next.iter_mut().find(|n| n.id == note.id) {
            Some(slot) => {
                debug!("Replacing note {} in place", note.id);
                *slot = note;
            }
            None => {
                debug!("Inserting new note {} at front", note.id);
                next.insert(0, note);
            }
        }

        self.backend.write(&next)?;
        self.notes = next;
        Ok(())
    }

    /// Removes the matching note, if present, and persists the collection.
    ///
    /// Returns `Ok(false)` without touching storage when the id is not
    /// found, so repeated deletes are idempotent.
    pub fn delete(&mut self, id: NoteId) -> Result<bool> {
        let Some(pos) = self.notes.iter().position(|n| n.id == id) else {
            debug!("Delete of note {}: not found, nothing to do", id);
            return Ok(false);
        };

        let mut next = self.notes.clone();
        next.remove(pos);

        self.backend.write(&next)?;
        self.notes = next;
        info!("Deleted note {}", id);
        Ok(true)
    }

    /// Retrieves a note by id from the working set.
    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// The full working set, newest-first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Distinct tags across all current notes, sorted lexicographically
    /// for stable display in a filter control.
    pub fn tag_set(&self) -> Vec<String> {
        let tags: BTreeSet<&str> = self
            .notes
            .iter()
            .flat_map(|n| n.tags.iter().map(String::as_str))
            .collect();
        tags.into_iter().map(str::to_string).collect()
    }

    /// Returns the notes matching a keyword and a tag, preserving the
    /// collection's newest-first order.
    ///
    /// The keyword is a case-insensitive substring test against title and
    /// body; the tag is an exact, case-sensitive membership test. An empty
    /// keyword or tag matches everything.
    pub fn filter(&self, keyword: &str, tag: &str) -> Vec<&Note> {
        let keyword = keyword.trim().to_lowercase();

        self.notes
            .iter()
            .filter(|note| {
                let matches_keyword = keyword.is_empty()
                    || note.title.to_lowercase().contains(&keyword)
                    || note.body.to_lowercase().contains(&keyword);

                let matches_tag = tag.is_empty() || note.tags.iter().any(|t| t == tag);

                matches_keyword && matches_tag
            })
            .collect()
    }

    /// Issues a fresh note id: the current millisecond timestamp, bumped
    /// past any existing id so two notes created in the same millisecond
    /// can never collide.
    pub fn next_id(&self) -> NoteId {
        let now = Utc::now().timestamp_millis();
        let max_existing = self.notes.iter().map(|n| n.id).max().unwrap_or(0);
        now.max(max_existing + 1)
    }

    /// Seeds the store with a single example note when the collection is
    /// empty, persisting it immediately. Returns whether a note was seeded.
    pub fn seed_example_note(&mut self) -> Result<bool> {
        if !self.notes.is_empty() {
            return Ok(false);
        }

        let now = Utc::now().timestamp_millis();
        let note = Note::new(
            now,
            "Welcome to Study Notes",
            "This is an example note. Feel free to edit or delete it.\n\n\
             What you can do here:\n\
             - Create a note with `new`\n\
             - Open a note to read its content\n\
             - Organize notes with tags and keyword search\n\
             - Export any note to a text file",
            vec!["example".to_string(), "welcome".to_string()],
            now,
        );

        self.upsert(note)?;
        info!("Seeded example note");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split_tags;

    fn note(id: NoteId, title: &str, body: &str, tags: &str) -> Note {
        Note::new(id, title, body, split_tags(tags), id)
    }

    fn store_with(notes: Vec<Note>) -> (NoteStore, MemoryBackend) {
        let backend = MemoryBackend::new();
        let mut store = NoteStore::new(Box::new(backend.clone()));
        for n in notes.into_iter().rev() {
            store.upsert(n).unwrap();
        }
        (store, backend)
    }

    #[test]
    fn load_defaults_to_empty() {
        let mut store = NoteStore::new(Box::new(MemoryBackend::new()));
        assert_eq!(store.load().unwrap(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn upsert_inserts_new_notes_at_front() {
        let (store, backend) = store_with(vec![
            note(3, "newest", "", ""),
            note(2, "middle", "", ""),
            note(1, "oldest", "", ""),
        ]);

        let ids: Vec<NoteId> = store.notes().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);

        // Every write carries the complete collection.
        assert_eq!(backend.stored().unwrap().len(), 3);
    }

    #[test]
    fn upsert_replaces_in_place() {
        let (mut store, backend) = store_with(vec![
            note(3, "newest", "", ""),
            note(2, "middle", "", ""),
            note(1, "oldest", "", ""),
        ]);

        store.upsert(note(2, "revised", "new body", "work")).unwrap();

        let ids: Vec<NoteId> = store.notes().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        assert_eq!(store.get(2).unwrap().title, "revised");
        assert_eq!(backend.stored().unwrap()[1].title, "revised");
    }

    #[test]
    fn delete_roundtrip_is_idempotent() {
        let (mut store, backend) = store_with(vec![note(1, "only", "", "")]);

        assert!(store.delete(1).unwrap());
        assert!(store.get(1).is_none());
        assert!(backend.stored().unwrap().is_empty());

        // Second delete of the same id is a no-op, not an error.
        assert!(!store.delete(1).unwrap());
    }

    #[test]
    fn failed_write_leaves_memory_unchanged() {
        let (mut store, backend) = store_with(vec![note(1, "keep me", "", "")]);

        backend.set_fail_writes(true);
        let err = store.upsert(note(2, "lost", "", "")).unwrap_err();
        assert!(matches!(err, NoteError::Storage { .. }));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(1).unwrap().title, "keep me");
        assert_eq!(backend.stored().unwrap().len(), 1);

        backend.set_fail_writes(true);
        assert!(store.delete(1).is_err());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn tag_set_is_distinct_and_sorted() {
        let (store, _) = store_with(vec![
            note(1, "a", "", "work urgent"),
            note(2, "b", "", "work idea idea"),
        ]);

        assert_eq!(store.tag_set(), vec!["idea", "urgent", "work"]);
    }

    #[test]
    fn filter_with_no_criteria_returns_everything_in_order() {
        let (store, _) = store_with(vec![
            note(3, "newest", "", ""),
            note(2, "middle", "", ""),
            note(1, "oldest", "", ""),
        ]);

        let all = store.filter("", "");
        let ids: Vec<NoteId> = all.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn keyword_filter_is_case_insensitive_on_title_and_body() {
        let (store, _) = store_with(vec![
            note(1, "Shopping List", "milk and eggs", ""),
            note(2, "Plan", "buy MILK tomorrow", ""),
            note(3, "Other", "nothing here", ""),
        ]);

        let hits = store.filter("Milk", "");
        let ids: Vec<NoteId> = hits.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn tag_filter_is_exact_and_case_sensitive() {
        let (store, _) = store_with(vec![
            note(1, "a", "", "Work"),
            note(2, "b", "", "work"),
        ]);

        let hits = store.filter("", "work");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 2);

        // "wor" is not a member, only whole tags match.
        assert!(store.filter("", "wor").is_empty());
    }

    #[test]
    fn keyword_and_tag_combine() {
        let (store, _) = store_with(vec![
            note(1, "Plan", "draft", "work urgent"),
            note(2, "Plan B", "draft", "home"),
        ]);

        let hits = store.filter("plan", "work");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);
    }

    #[test]
    fn next_id_never_collides_with_existing_ids() {
        let far_future = Utc::now().timestamp_millis() + 1_000_000;
        let (store, _) = store_with(vec![note(far_future, "future", "", "")]);

        assert_eq!(store.next_id(), far_future + 1);

        let (empty, _) = store_with(vec![]);
        assert!(empty.next_id() > 0);
    }

    #[test]
    fn seeding_an_empty_store_adds_exactly_one_example_note() {
        let (mut store, backend) = store_with(vec![]);

        assert!(store.seed_example_note().unwrap());
        assert_eq!(store.len(), 1);

        let seeded = &store.notes()[0];
        assert!(!seeded.tags.is_empty());
        assert_eq!(seeded.id, seeded.updated);
        assert_eq!(backend.stored().unwrap().len(), 1);

        // Seeding is one-shot: a populated store is left alone.
        assert!(!store.seed_example_note().unwrap());
        assert_eq!(store.len(), 1);
    }
}

//! End-to-end persistence tests for the JSON file backend.

use std::fs;

use study_notes::{split_tags, JsonFileBackend, Note, NoteStore, StorageBackend, STORE_KEY};
use tempfile::tempdir;

#[test]
fn missing_document_loads_as_empty_collection() {
    let dir = tempdir().unwrap();
    let backend = JsonFileBackend::new(dir.path().join("study_notes.json"));

    let mut store = NoteStore::new(Box::new(backend));
    assert_eq!(store.load().unwrap(), 0);
    assert!(store.is_empty());
}

#[test]
fn notes_round_trip_through_the_store_document() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("study_notes.json");

    let mut store = NoteStore::new(Box::new(JsonFileBackend::new(path.clone())));
    store.load().unwrap();
    store
        .upsert(Note::new(
            1_700_000_000_000,
            "Plan",
            "draft",
            split_tags("work urgent"),
            1_700_000_000_000,
        ))
        .unwrap();
    store
        .upsert(Note::new(
            1_700_000_000_001,
            "Groceries",
            "milk",
            vec![],
            1_700_000_000_001,
        ))
        .unwrap();

    // The document keeps the complete collection under the studyNotes key.
    let raw = fs::read_to_string(&path).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(doc[STORE_KEY].as_array().unwrap().len(), 2);
    assert_eq!(doc[STORE_KEY][0]["title"], "Groceries");

    // A fresh store sees the same notes, newest-first.
    let mut reloaded = NoteStore::new(Box::new(JsonFileBackend::new(path.clone())));
    assert_eq!(reloaded.load().unwrap(), 2);
    assert_eq!(reloaded.notes()[0].title, "Groceries");
    assert_eq!(reloaded.notes()[1].title, "Plan");
    assert_eq!(reloaded.notes()[1].tags, vec!["work", "urgent"]);

    reloaded.delete(1_700_000_000_001).unwrap();
    let mut after_delete = NoteStore::new(Box::new(JsonFileBackend::new(path)));
    assert_eq!(after_delete.load().unwrap(), 1);
    assert_eq!(after_delete.notes()[0].title, "Plan");
}

#[test]
fn write_creates_missing_parent_directories() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("data").join("study_notes.json");

    let backend = JsonFileBackend::new(path.clone());
    backend
        .write(&[Note::new(1, "x", "y", vec![], 1)])
        .unwrap();

    assert!(path.exists());
    assert_eq!(backend.read().unwrap().unwrap().len(), 1);
}

#[test]
fn corrupt_document_is_a_read_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("study_notes.json");
    fs::write(&path, "not json at all").unwrap();

    let mut store = NoteStore::new(Box::new(JsonFileBackend::new(path)));
    assert!(store.load().is_err());
}

#[test]
fn seeding_persists_exactly_one_example_note() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("study_notes.json");

    let mut store = NoteStore::new(Box::new(JsonFileBackend::new(path.clone())));
    store.load().unwrap();
    assert!(store.seed_example_note().unwrap());

    let mut reloaded = NoteStore::new(Box::new(JsonFileBackend::new(path)));
    assert_eq!(reloaded.load().unwrap(), 1);
    assert!(!reloaded.notes()[0].tags.is_empty());

    // Already populated, so a second initialization leaves it alone.
    assert!(!reloaded.seed_example_note().unwrap());
}

use thiserror::Error;

use super::note::{MAX_NOTES, Note, TITLE_CAPACITY};
use super::text::copy_truncating;
use crate::storage::{NoteDir, PersistError, is_safe_title};

/// Why the store turned a request down. None of these change any state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("title is empty")]
    EmptyTitle,
    #[error("title {0:?} cannot be used as a file name")]
    InvalidTitle(String),
    #[error("note limit of {} reached", MAX_NOTES)]
    Full,
    #[error("no note selected")]
    NoSelection,
    #[error("note is full")]
    ContentFull,
}

/// Outcome of flushing a mutation to disk.
///
/// The in-memory change stands either way; a failed save leaves the file
/// behind until the next successful save of the same title.
#[derive(Debug)]
#[must_use]
pub enum SaveStatus {
    Saved,
    Failed(PersistError),
}

impl SaveStatus {
    fn from_result(result: Result<(), PersistError>) -> Self {
        match result {
            Ok(()) => SaveStatus::Saved,
            Err(err) => {
                tracing::warn!("save failed: {err}");
                SaveStatus::Failed(err)
            }
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, SaveStatus::Saved)
    }
}

/// Bounded, ordered collection of notes plus the current selection.
pub struct NoteStore {
    notes: Vec<Note>,
    selected: Option<usize>,
    dir: NoteDir,
}

impl NoteStore {
    /// Populate a store from whatever the notes directory holds.
    pub fn load(dir: NoteDir) -> Self {
        let notes = dir.load_all(MAX_NOTES);
        Self {
            notes,
            selected: None,
            dir,
        }
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.notes.len() >= MAX_NOTES
    }

    pub fn get(&self, index: usize) -> Option<&Note> {
        self.notes.get(index)
    }

    pub fn titles(&self) -> Vec<&str> {
        self.notes.iter().map(Note::title).collect()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_note(&self) -> Option<&Note> {
        self.selected.and_then(|idx| self.get(idx))
    }

    /// Add an empty note, write its file and select it.
    pub fn create_note(&mut self, title: &str) -> Result<(usize, SaveStatus), StoreError> {
        if title.is_empty() {
            return Err(StoreError::EmptyTitle);
        }
        if self.is_full() {
            return Err(StoreError::Full);
        }

        let title = copy_truncating(TITLE_CAPACITY, title);
        if !is_safe_title(&title) {
            return Err(StoreError::InvalidTitle(title));
        }

        let note = Note::new(&title);
        let status = SaveStatus::from_result(self.dir.save(note.title(), note.content()));

        let index = self.notes.len();
        self.notes.push(note);
        self.selected = Some(index);

        tracing::info!(index, title = %title, "note created");
        Ok((index, status))
    }

    /// Point the selection at `index`. Out-of-range indexes are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.notes.len() {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    pub fn next_note(&mut self) {
        self.step(1);
    }

    pub fn previous_note(&mut self) {
        self.step(-1);
    }

    fn step(&mut self, delta: isize) {
        let count = self.notes.len();
        if count == 0 {
            return;
        }

        let current = self.selected.unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(count as isize) as usize;
        self.selected = Some(next);
    }

    /// Add a line to the selected note and write it out.
    pub fn append_to_selected(&mut self, text: &str) -> Result<SaveStatus, StoreError> {
        let idx = self.selected.ok_or(StoreError::NoSelection)?;
        let note = self.notes.get_mut(idx).ok_or(StoreError::NoSelection)?;

        if !note.append_line(text) {
            tracing::info!(index = idx, bytes = text.len(), "line refused, note is full");
            return Err(StoreError::ContentFull);
        }

        tracing::info!(index = idx, bytes = text.len(), "line appended");
        Ok(SaveStatus::from_result(
            self.dir.save(note.title(), note.content()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn empty_store() -> (TempDir, NoteStore) {
        let tmp = TempDir::new().expect("tempdir");
        let store = NoteStore::load(NoteDir::new(tmp.path().join("notes")));
        (tmp, store)
    }

    #[test]
    fn create_persists_empty_file_and_selects() {
        let (tmp, mut store) = empty_store();
        let (idx, status) = store.create_note("todo").expect("create");
        assert!(status.is_saved());
        assert_eq!(idx, 0);
        assert_eq!(store.len(), 1);
        assert_eq!(store.selected_index(), Some(0));

        let note = store.get(0).expect("note");
        assert_eq!(note.title(), "todo");
        assert_eq!(note.content(), "");

        let path = tmp.path().join("notes").join("todo");
        assert_eq!(fs::metadata(path).expect("file").len(), 0);
    }

    #[test]
    fn create_rejects_empty_title() {
        let (_tmp, mut store) = empty_store();
        assert_eq!(store.create_note("").unwrap_err(), StoreError::EmptyTitle);
        assert!(store.is_empty());
        assert_eq!(store.selected_index(), None);
    }

    #[test]
    fn eleventh_create_is_rejected() {
        let (_tmp, mut store) = empty_store();
        for i in 0..MAX_NOTES {
            let _ = store.create_note(&format!("n{i}")).expect("create");
        }
        assert_eq!(store.create_note("overflow").unwrap_err(), StoreError::Full);
        assert_eq!(store.len(), MAX_NOTES);
        assert_eq!(store.selected_index(), Some(MAX_NOTES - 1));
    }

    #[test]
    fn create_rejects_path_titles() {
        let (tmp, mut store) = empty_store();
        let err = store.create_note("../outside").unwrap_err();
        assert!(matches!(err, StoreError::InvalidTitle(_)));
        assert!(store.is_empty());
        assert!(!tmp.path().join("outside").exists());
    }

    #[test]
    fn create_truncates_long_title() {
        let (tmp, mut store) = empty_store();
        let long = "a".repeat(50);
        let _ = store.create_note(&long).expect("create");
        let expected = "a".repeat(TITLE_CAPACITY - 1);
        assert_eq!(store.get(0).expect("note").title(), expected);
        assert!(tmp.path().join("notes").join(&expected).exists());
    }

    #[test]
    fn append_joins_lines_and_saves() {
        let (tmp, mut store) = empty_store();
        let _ = store.create_note("todo").expect("create");
        let _ = store.append_to_selected("buy milk").expect("append");
        let status = store.append_to_selected("call mom").expect("append");
        assert!(status.is_saved());

        assert_eq!(store.get(0).expect("note").content(), "buy milk\ncall mom");
        let body = fs::read_to_string(tmp.path().join("notes").join("todo")).expect("read");
        assert_eq!(body, "buy milk\ncall mom");
    }

    #[test]
    fn append_to_full_note_is_refused() {
        let tmp = TempDir::new().expect("tempdir");
        let dir = NoteDir::new(tmp.path().join("notes"));
        dir.save("full", &"x".repeat(1020)).expect("seed");

        let mut store = NoteStore::load(dir);
        assert!(store.select(0));
        assert_eq!(
            store.append_to_selected("xyz").unwrap_err(),
            StoreError::ContentFull
        );
        assert_eq!(store.get(0).expect("note").content().len(), 1020);
    }

    #[test]
    fn append_without_selection_is_refused() {
        let (_tmp, mut store) = empty_store();
        assert_eq!(
            store.append_to_selected("hi").unwrap_err(),
            StoreError::NoSelection
        );
    }

    #[test]
    fn navigation_wraps_both_ways() {
        let (_tmp, mut store) = empty_store();
        for title in ["a", "b", "c"] {
            let _ = store.create_note(title).expect("create");
        }

        assert!(store.select(0));
        store.previous_note();
        assert_eq!(store.selected_index(), Some(2));
        store.next_note();
        assert_eq!(store.selected_index(), Some(0));
        store.next_note();
        assert_eq!(store.selected_index(), Some(1));
    }

    #[test]
    fn navigation_on_empty_store_is_noop() {
        let (_tmp, mut store) = empty_store();
        store.next_note();
        store.previous_note();
        assert_eq!(store.selected_index(), None);
        assert!(!store.select(0));
    }

    #[test]
    fn failed_save_keeps_note_in_memory() {
        let tmp = TempDir::new().expect("tempdir");
        // A regular file where the directory should be makes every save fail.
        let blocker = tmp.path().join("notes");
        fs::write(&blocker, "not a dir").expect("write");

        let mut store = NoteStore::load(NoteDir::new(&blocker));
        let (idx, status) = store.create_note("todo").expect("create");
        assert!(!status.is_saved());
        assert_eq!(store.get(idx).expect("note").title(), "todo");
    }
}

// File: src/store.rs
use crate::core::lexicon::Lexicon;
use crate::core::types::{CategoryWords, LexiconEntry};
use crate::error::StorageError;
use crate::persistence::{load_from_disk, save_to_disk};
use parking_lot::{Mutex, RwLock};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// The shared word → category dictionary.
///
/// `replace_all` is the only mutation. Readers must observe either the complete dictionary
/// before a replacement or the complete one after it.
pub trait DictionaryStore: Send + Sync {
    /// Clears the dictionary and inserts one entry per (category, lowercased word).
    fn replace_all(&self, categories: &CategoryWords) -> Result<(), StorageError>;

    /// Entries for the words of `words` that have one. Unknown words are left out.
    fn lookup_many(&self, words: &BTreeSet<String>) -> Result<Vec<LexiconEntry>, StorageError>;

    /// Distinct categories with at least one word.
    fn list_categories(&self) -> Result<BTreeSet<String>, StorageError>;

    /// Every word grouped under its category.
    fn export_grouped_by_category(&self) -> Result<CategoryWords, StorageError>;
}

impl<S: DictionaryStore + ?Sized> DictionaryStore for Arc<S> {
    fn replace_all(&self, categories: &CategoryWords) -> Result<(), StorageError> {
        (**self).replace_all(categories)
    }

    fn lookup_many(&self, words: &BTreeSet<String>) -> Result<Vec<LexiconEntry>, StorageError> {
        (**self).lookup_many(words)
    }

    fn list_categories(&self) -> Result<BTreeSet<String>, StorageError> {
        (**self).list_categories()
    }

    fn export_grouped_by_category(&self) -> Result<CategoryWords, StorageError> {
        (**self).export_grouped_by_category()
    }
}

/// Snapshot-swapping dictionary store, in memory or backed by a snapshot file.
///
/// Each replacement builds a new [`Lexicon`], persists it when a path is set, and only then
/// swaps the shared `Arc`. Readers clone the `Arc` under a brief read lock and work on that
/// snapshot, so they never see a half-built dictionary. Replacements queue on `writer`; the
/// read/write lock is held only for the swap, never across disk I/O.
pub struct LexiconStore {
    current: RwLock<Arc<Lexicon>>,
    writer: Mutex<()>,
    dictionary_path: Option<PathBuf>,
}

impl LexiconStore {
    pub fn in_memory() -> Self {
        Self { current: RwLock::new(Arc::new(Lexicon::new())), writer: Mutex::new(()), dictionary_path: None }
    }

    /// Opens a file-backed store. A missing file starts empty; an unreadable one is an error.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let lexicon = load_from_disk(path)?;
        info!(path = %path.display(), words = lexicon.len(), "opened dictionary");
        Ok(Self {
            current: RwLock::new(Arc::new(lexicon)),
            writer: Mutex::new(()),
            dictionary_path: Some(path.to_path_buf()),
        })
    }

    pub fn dictionary_path(&self) -> Option<&Path> {
        self.dictionary_path.as_deref()
    }

    /// The dictionary as of now; later replacements do not affect the returned value.
    pub fn snapshot(&self) -> Arc<Lexicon> {
        self.current.read().clone()
    }
}

impl Default for LexiconStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl DictionaryStore for LexiconStore {
    fn replace_all(&self, categories: &CategoryWords) -> Result<(), StorageError> {
        let lexicon = Lexicon::from_categories(categories);

        // Disk and memory must agree on the last replacement.
        let _writer = self.writer.lock();
        if let Some(path) = &self.dictionary_path {
            save_to_disk(&lexicon, path)?;
        }
        info!(
            words = lexicon.len(),
            categories = lexicon.categories().len(),
            "replaced dictionary"
        );
        *self.current.write() = Arc::new(lexicon);
        Ok(())
    }

    fn lookup_many(&self, words: &BTreeSet<String>) -> Result<Vec<LexiconEntry>, StorageError> {
        Ok(self.snapshot().lookup_many(words))
    }

    fn list_categories(&self) -> Result<BTreeSet<String>, StorageError> {
        Ok(self.snapshot().categories())
    }

    fn export_grouped_by_category(&self) -> Result<CategoryWords, StorageError> {
        Ok(self.snapshot().grouped())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn payload(pairs: &[(&str, &[&str])]) -> CategoryWords {
        pairs
            .iter()
            .map(|(c, ws)| (c.to_string(), ws.iter().map(|w| w.to_string()).collect()))
            .collect()
    }

    #[test]
    fn replace_is_not_a_merge() {
        let store = LexiconStore::in_memory();
        store.replace_all(&payload(&[("positive_emotion", &["happy"])])).unwrap();
        store.replace_all(&payload(&[("social", &["friend"])])).unwrap();

        let grouped = store.export_grouped_by_category().unwrap();
        assert_eq!(grouped, payload(&[("social", &["friend"])]));
        let words: BTreeSet<String> = ["happy".to_string()].into();
        assert!(store.lookup_many(&words).unwrap().is_empty());
    }

    #[test]
    fn empty_replace_clears_everything() {
        let store = LexiconStore::in_memory();
        store.replace_all(&payload(&[("social", &["friend"])])).unwrap();
        store.replace_all(&CategoryWords::new()).unwrap();
        assert!(store.export_grouped_by_category().unwrap().is_empty());
        assert!(store.list_categories().unwrap().is_empty());
    }

    #[test]
    fn file_store_reopens_with_last_dictionary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.bin");
        {
            let store = LexiconStore::open(&path).unwrap();
            assert!(store.list_categories().unwrap().is_empty());
            store.replace_all(&payload(&[("cognitive", &["Think", "know"])])).unwrap();
        }
        let reopened = LexiconStore::open(&path).unwrap();
        assert_eq!(reopened.export_grouped_by_category().unwrap(), payload(&[("cognitive", &["know", "think"])]));
        assert_eq!(reopened.dictionary_path(), Some(path.as_path()));
    }

    #[test]
    fn failed_write_keeps_old_dictionary() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the snapshot file should be makes the final rename fail.
        let path = dir.path().join("lexicon.bin");
        let store = LexiconStore::open(&path).unwrap();
        store.replace_all(&payload(&[("social", &["friend"])])).unwrap();
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        let err = store.replace_all(&payload(&[("cognitive", &["think"])])).unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
        assert_eq!(store.export_grouped_by_category().unwrap(), payload(&[("social", &["friend"])]));
    }

    #[test]
    fn snapshot_is_unaffected_by_later_replace() {
        let store = LexiconStore::in_memory();
        store.replace_all(&payload(&[("social", &["friend"])])).unwrap();
        let before = store.snapshot();
        store.replace_all(&CategoryWords::new()).unwrap();
        assert_eq!(before.category_of("friend"), Some("social"));
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn reads_proceed_while_a_replacement_is_pending() {
        let store = LexiconStore::in_memory();
        store.replace_all(&payload(&[("social", &["friend"])])).unwrap();

        // A replacement in progress holds only the writer mutex.
        let pending = store.writer.lock();
        let words: BTreeSet<String> = ["friend".to_string()].into();
        assert_eq!(store.lookup_many(&words).unwrap(), vec![LexiconEntry::new("friend", "social")]);
        assert_eq!(store.export_grouped_by_category().unwrap(), payload(&[("social", &["friend"])]));
        drop(pending);

        store.replace_all(&CategoryWords::new()).unwrap();
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn readers_never_see_a_partial_dictionary() {
        let old: Vec<String> = (0..200).map(|i| format!("old{i}")).collect();
        let new: Vec<String> = (0..200).map(|i| format!("new{i}")).collect();
        let old_payload: CategoryWords = [("social".to_string(), old.clone())].into();
        let new_payload: CategoryWords = [("cognitive".to_string(), new.clone())].into();

        let store = Arc::new(LexiconStore::in_memory());
        store.replace_all(&old_payload).unwrap();
        let all_words: BTreeSet<String> = old.iter().chain(new.iter()).cloned().collect();

        let writer = {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..50 {
                    let p = if i % 2 == 0 { &new_payload } else { &old_payload };
                    store.replace_all(p).unwrap();
                }
            })
        };
        for _ in 0..200 {
            let hits = store.lookup_many(&all_words).unwrap();
            assert_eq!(hits.len(), 200);
            let first = &hits[0].category;
            assert!(hits.iter().all(|e| &e.category == first));
        }
        writer.join().unwrap();
    }
}

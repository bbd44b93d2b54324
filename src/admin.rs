// File: src/admin.rs
use crate::core::types::CategoryWords;
use crate::error::StorageError;
use crate::store::DictionaryStore;
use tracing::error;

/// Bulk dictionary maintenance on top of a [`DictionaryStore`].
pub struct DictionaryAdmin<S> {
    store: S,
}

impl<S: DictionaryStore> DictionaryAdmin<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Replaces the whole dictionary. An empty mapping clears it.
    pub fn update_dictionary(&self, categories: &CategoryWords) -> Result<(), StorageError> {
        self.store.replace_all(categories)
    }

    /// The current dictionary grouped by category. Failures are logged and returned.
    pub fn get_dictionary(&self) -> Result<CategoryWords, StorageError> {
        self.store.export_grouped_by_category().map_err(|e| {
            error!(error = %e, "failed to export dictionary");
            e
        })
    }

    /// Category names in ascending order.
    pub fn list_categories(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.store.list_categories()?.into_iter().collect())
    }
}

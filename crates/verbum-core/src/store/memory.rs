//! In-memory item store
//!
//! Keeps items in insertion order behind an `RwLock`. Snapshots can be
//! loaded from and saved to a pretty-printed JSON array.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{Result, VerbumError};
use crate::vocab::{ItemUpdate, VocabularyItem};

use super::{ItemFilter, ItemStore};

#[derive(Debug, Default)]
struct Inner {
    order: Vec<String>,
    items: HashMap<String, VocabularyItem>,
}

impl Inner {
    fn upsert(&mut self, item: VocabularyItem) {
        if !self.items.contains_key(&item.item_id) {
            self.order.push(item.item_id.clone());
        }
        self.items.insert(item.item_id.clone(), item);
    }
}

/// Reference [`ItemStore`] held entirely in memory
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a snapshot, later duplicates replacing earlier ones
    pub fn from_items(items: impl IntoIterator<Item = VocabularyItem>) -> Self {
        let mut inner = Inner::default();
        for item in items {
            inner.upsert(item);
        }
        Self {
            inner: RwLock::new(inner),
        }
    }

    /// Load a JSON array snapshot
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let items: Vec<VocabularyItem> = serde_json::from_str(&raw)?;
        tracing::info!(path = %path.display(), items = items.len(), "Loaded item snapshot");
        Ok(Self::from_items(items))
    }

    /// Write every item as a pretty JSON array
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let items = self.snapshot()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, serde_json::to_string_pretty(&items)?)?;
        tracing::debug!(path = %path.display(), items = items.len(), "Saved item snapshot");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.read().map(|inner| inner.order.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| VerbumError::Store("Reader lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| VerbumError::Store("Writer lock poisoned".into()))
    }
}

impl ItemStore for InMemoryStore {
    fn list_items(&self, filter: &ItemFilter) -> Result<Vec<VocabularyItem>> {
        let inner = self.read()?;
        Ok(inner
            .order
            .iter()
            .filter_map(|id| inner.items.get(id))
            .filter(|item| filter.matches(item))
            .cloned()
            .collect())
    }

    fn get_item(&self, item_id: &str) -> Result<Option<VocabularyItem>> {
        Ok(self.read()?.items.get(item_id).cloned())
    }

    fn apply_update(&self, update: &ItemUpdate) -> Result<VocabularyItem> {
        let mut inner = self.write()?;
        let item = inner
            .items
            .get_mut(&update.item_id)
            .ok_or_else(|| VerbumError::NotFound(update.item_id.clone()))?;
        update.apply(item);
        Ok(item.clone())
    }

    fn insert_item(&self, mut item: VocabularyItem) -> Result<VocabularyItem> {
        if item.item_id.is_empty() {
            item.item_id = uuid::Uuid::new_v4().to_string();
        }
        self.write()?.upsert(item.clone());
        Ok(item)
    }
}

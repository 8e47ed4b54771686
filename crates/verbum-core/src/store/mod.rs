//! Item Store Boundary
//!
//! The scheduler never owns persistence. It reads snapshots from, and writes
//! partial updates to, whatever implements [`ItemStore`]:
//! - `list_items`: filtered read (familiarity "any of", container)
//! - `get_item`: single read by id
//! - `apply_update`: partial write keyed by item id
//! - `insert_item`: lifecycle creation
//!
//! [`InMemoryStore`] is the reference implementation, with JSON snapshot
//! load/save for tooling and tests.

mod memory;

pub use memory::InMemoryStore;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::vocab::{Familiarity, ItemUpdate, VocabularyItem};

/// Filter for [`ItemStore::list_items`]
///
/// Empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemFilter {
    /// Keep items whose familiarity is any of these
    pub familiarity: Option<Vec<Familiarity>>,
    /// Keep items met in this container
    pub container_id: Option<String>,
}

impl ItemFilter {
    /// Match any of the given familiarity values
    pub fn any_of(familiarity: impl IntoIterator<Item = Familiarity>) -> Self {
        Self {
            familiarity: Some(familiarity.into_iter().collect()),
            container_id: None,
        }
    }

    /// Restrict to a container
    pub fn in_container(mut self, container_id: impl Into<String>) -> Self {
        self.container_id = Some(container_id.into());
        self
    }

    pub fn matches(&self, item: &VocabularyItem) -> bool {
        let familiarity_ok = self
            .familiarity
            .as_ref()
            .map(|allowed| allowed.contains(&item.familiarity))
            .unwrap_or(true);
        let container_ok = self
            .container_id
            .as_deref()
            .map(|container| item.appears_in(container))
            .unwrap_or(true);
        familiarity_ok && container_ok
    }
}

/// Storage collaborator consumed by sessions and tooling
pub trait ItemStore {
    /// Items matching `filter`, in a stable order
    fn list_items(&self, filter: &ItemFilter) -> Result<Vec<VocabularyItem>>;

    /// A single item by id
    fn get_item(&self, item_id: &str) -> Result<Option<VocabularyItem>>;

    /// Apply a partial update and return the item as stored afterwards
    ///
    /// Fails with `NotFound` for unknown ids.
    fn apply_update(&self, update: &ItemUpdate) -> Result<VocabularyItem>;

    /// Create (or replace) an item and return it as stored
    fn insert_item(&self, item: VocabularyItem) -> Result<VocabularyItem>;

    /// Every item, suspended ones included
    fn snapshot(&self) -> Result<Vec<VocabularyItem>> {
        self.list_items(&ItemFilter::default())
    }
}

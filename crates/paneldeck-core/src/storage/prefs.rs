//! Small user-facing preferences: the recent-layouts list and the
//! first-run welcome flag.

use super::{KvStore, StoreError, StoreResult};
use crate::document::Document;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Store key for the recent-layouts list.
pub const RECENT_KEY: &str = "paneldeck-recent";

/// Store key for the welcome flag.
pub const WELCOMED_KEY: &str = "paneldeck-welcomed";

/// Maximum number of entries kept in the recent-layouts list.
pub const MAX_RECENT: usize = 20;

/// One line in the recent-layouts list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentEntry {
    pub id: String,
    /// When the layout was last worked on, in milliseconds since the epoch.
    pub timestamp: u64,
    pub element_count: usize,
    /// Display dimensions as shown in the list, e.g. "280x240".
    pub display_size: String,
}

impl RecentEntry {
    pub fn for_document(id: impl Into<String>, document: &Document, now_ms: u64) -> Self {
        Self {
            id: id.into(),
            timestamp: now_ms,
            element_count: document.elements.len(),
            display_size: format!("{}x{}", document.display.width, document.display.height),
        }
    }
}

/// Most-recently-used layouts, newest first, deduplicated by id.
pub struct RecentLayouts {
    store: Arc<dyn KvStore>,
}

impl RecentLayouts {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// All entries, newest first. A missing or unreadable list is empty.
    pub fn list(&self) -> StoreResult<Vec<RecentEntry>> {
        let Some(raw) = self.store.get(RECENT_KEY)? else {
            return Ok(Vec::new());
        };
        Ok(serde_json::from_str(&raw).unwrap_or_default())
    }

    /// Add an entry at the front, replacing any previous entry with the
    /// same id and dropping everything past [`MAX_RECENT`].
    pub fn add(&self, entry: RecentEntry) -> StoreResult<()> {
        let mut entries = self.list()?;
        entries.retain(|e| e.id != entry.id);
        entries.insert(0, entry);
        entries.truncate(MAX_RECENT);
        self.write(&entries)
    }

    pub fn remove(&self, id: &str) -> StoreResult<()> {
        let mut entries = self.list()?;
        entries.retain(|e| e.id != id);
        self.write(&entries)
    }

    pub fn clear(&self) -> StoreResult<()> {
        self.store.remove(RECENT_KEY)
    }

    fn write(&self, entries: &[RecentEntry]) -> StoreResult<()> {
        let json = serde_json::to_string(entries)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.store.set(RECENT_KEY, &json)
    }
}

/// Whether this user has already seen the first-run welcome.
pub fn is_welcomed(store: &dyn KvStore) -> StoreResult<bool> {
    Ok(store.get(WELCOMED_KEY)?.as_deref() == Some("1"))
}

/// Record that the first-run welcome has been shown.
pub fn set_welcomed(store: &dyn KvStore) -> StoreResult<()> {
    store.set(WELCOMED_KEY, "1")
}

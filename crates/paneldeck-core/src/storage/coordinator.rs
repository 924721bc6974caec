//! Autosave and lock lifecycle for an editing session.
//!
//! The coordinator owns the session's [`EditLock`] and drives persistence
//! from an external clock: callers mark the document dirty as it changes
//! and call [`PersistenceCoordinator::tick`] regularly with the current
//! time and document. Saves are debounced so a burst of edits produces a
//! single write, and heartbeats keep the lock claim fresh. Feeding store
//! change notifications through [`PersistenceCoordinator::handle_change`]
//! demotes the session to read-only the moment another session takes the
//! lock.

use super::{EditLock, KvChange, KvStore, StoreError, StoreResult, EDIT_LOCK_KEY};
use crate::document::Document;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Store key the autosave record lives under.
pub const AUTOSAVE_KEY: &str = "paneldeck-autosave";

/// Quiet period after the last edit before the autosave fires, in
/// milliseconds.
pub const AUTOSAVE_DEBOUNCE_MS: u64 = 1_000;

/// How often the lock claim is refreshed while editing, in milliseconds.
pub const HEARTBEAT_INTERVAL_MS: u64 = 10_000;

/// Version written into autosave records. Records with any other version
/// are discarded on load.
pub const SCHEMA_VERSION: u32 = 1;

/// The envelope stored under [`AUTOSAVE_KEY`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutosaveRecord {
    pub version: u32,
    /// When the record was written, in milliseconds since the epoch.
    pub timestamp: u64,
    pub layout: Document,
}

/// Drives autosave, heartbeats, and lock handover for one session.
pub struct PersistenceCoordinator {
    store: Arc<dyn KvStore>,
    lock: EditLock,
    /// When the document first became dirty after the last save.
    dirty_since: Option<u64>,
    last_heartbeat: u64,
    editing: bool,
}

impl PersistenceCoordinator {
    pub fn new(store: Arc<dyn KvStore>, session_id: Uuid) -> Self {
        let lock = EditLock::new(store.clone(), session_id);
        Self {
            store,
            lock,
            dirty_since: None,
            last_heartbeat: 0,
            editing: false,
        }
    }

    /// Try to begin editing. Returns false when another session holds a
    /// fresh lock, in which case this session should stay read-only.
    pub fn start(&mut self, now_ms: u64) -> StoreResult<bool> {
        if self.lock.acquire(now_ms)? {
            self.editing = true;
            self.last_heartbeat = now_ms;
            Ok(true)
        } else {
            self.editing = false;
            Ok(false)
        }
    }

    /// Take over editing from whoever holds the lock, returning the
    /// autosaved layout if a non-empty one exists.
    pub fn take_control(&mut self, now_ms: u64) -> StoreResult<Option<Document>> {
        self.lock.force_acquire(now_ms)?;
        self.editing = true;
        self.last_heartbeat = now_ms;
        Ok(self
            .load_autosave()?
            .filter(|layout| !layout.elements.is_empty()))
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn session_id(&self) -> Uuid {
        self.lock.session_id()
    }

    pub fn lock(&self) -> &EditLock {
        &self.lock
    }

    /// Record that the document changed. Each call re-arms the debounce,
    /// so the save lands [`AUTOSAVE_DEBOUNCE_MS`] after the last edit in a
    /// burst. Ignored while read-only.
    pub fn mark_dirty(&mut self, now_ms: u64) {
        if self.editing {
            self.dirty_since = Some(now_ms);
        }
    }

    /// Advance the clock: refresh the lock heartbeat and flush a pending
    /// autosave once its quiet period has elapsed. Returns true when a
    /// save was written.
    pub fn tick(&mut self, document: &Document, now_ms: u64) -> StoreResult<bool> {
        if !self.editing {
            return Ok(false);
        }
        if now_ms.saturating_sub(self.last_heartbeat) >= HEARTBEAT_INTERVAL_MS {
            self.lock.heartbeat(now_ms)?;
            self.last_heartbeat = now_ms;
        }
        if matches!(self.dirty_since, Some(since) if now_ms.saturating_sub(since) >= AUTOSAVE_DEBOUNCE_MS)
        {
            self.dirty_since = None;
            self.save_autosave(document, now_ms)?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Write the document to the autosave slot immediately.
    pub fn save_autosave(&self, document: &Document, now_ms: u64) -> StoreResult<()> {
        let record = AutosaveRecord {
            version: SCHEMA_VERSION,
            timestamp: now_ms,
            layout: document.clone(),
        };
        let json = serde_json::to_string(&record)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.store.set(AUTOSAVE_KEY, &json)
    }

    /// Load the autosaved layout. Unreadable and version-mismatched
    /// records are discarded so they cannot wedge startup.
    pub fn load_autosave(&self) -> StoreResult<Option<Document>> {
        let Some(raw) = self.store.get(AUTOSAVE_KEY)? else {
            return Ok(None);
        };
        let record: AutosaveRecord = match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(err) => {
                log::warn!("discarding unreadable autosave: {err}");
                self.store.remove(AUTOSAVE_KEY)?;
                return Ok(None);
            }
        };
        if record.version != SCHEMA_VERSION {
            log::warn!(
                "discarding autosave with schema version {} (expected {SCHEMA_VERSION})",
                record.version
            );
            self.store.remove(AUTOSAVE_KEY)?;
            return Ok(None);
        }
        Ok(Some(record.layout))
    }

    /// Whether a restorable autosave exists. This only probes; unlike
    /// [`PersistenceCoordinator::load_autosave`] it never removes a bad
    /// record.
    pub fn has_autosave(&self) -> StoreResult<bool> {
        let Some(raw) = self.store.get(AUTOSAVE_KEY)? else {
            return Ok(false);
        };
        match serde_json::from_str::<AutosaveRecord>(&raw) {
            Ok(record) => Ok(!record.layout.elements.is_empty()),
            Err(_) => Ok(false),
        }
    }

    /// Drop the autosave slot and any pending save.
    pub fn clear_autosave(&mut self) -> StoreResult<()> {
        self.dirty_since = None;
        self.store.remove(AUTOSAVE_KEY)
    }

    /// React to a store change. When another session has taken the lock,
    /// this session drops to read-only and its pending autosave is
    /// cancelled so it cannot clobber the new editor's work. Returns true
    /// when a demotion happened.
    pub fn handle_change(&mut self, change: &KvChange, now_ms: u64) -> StoreResult<bool> {
        if change.key != EDIT_LOCK_KEY || !self.editing {
            return Ok(false);
        }
        if self.lock.is_locked_by_other(now_ms)? {
            self.editing = false;
            self.dirty_since = None;
            self.lock.release()?;
            log::info!("edit lock taken by another session; dropping to read-only");
            return Ok(true);
        }
        Ok(false)
    }

    /// End the session: release the lock and forget any pending save.
    pub fn stop(&mut self) -> StoreResult<()> {
        self.editing = false;
        self.dirty_since = None;
        self.lock.release()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Element;
    use crate::props::Props;
    use crate::storage::MemoryKv;

    fn coordinator() -> (Arc<MemoryKv>, PersistenceCoordinator) {
        let store = Arc::new(MemoryKv::new());
        let coordinator = PersistenceCoordinator::new(store.clone(), Uuid::new_v4());
        (store, coordinator)
    }

    fn sample_document() -> Document {
        let mut document = Document::new();
        let mut props = Props::new();
        props.set("x", 10.0);
        props.set("y", 20.0);
        props.set("w", 40.0);
        props.set("h", 30.0);
        let id = document.allocate_id();
        document.add_element(Element::new(id, "filled-rect", "Filled Rect 1", props));
        document
    }

    #[test]
    fn test_autosave_debounce() {
        let (_store, mut c) = coordinator();
        let document = sample_document();
        assert!(c.start(0).unwrap());

        c.mark_dirty(100);
        assert!(!c.tick(&document, 600).unwrap());
        assert!(c.tick(&document, 1_100).unwrap());
        // Flushed; nothing more to save.
        assert!(!c.tick(&document, 2_200).unwrap());

        // Each edit re-arms the quiet period.
        c.mark_dirty(3_000);
        c.mark_dirty(3_600);
        assert!(!c.tick(&document, 4_100).unwrap());
        assert!(c.tick(&document, 4_600).unwrap());
    }

    #[test]
    fn test_autosave_round_trip() {
        let (_store, mut c) = coordinator();
        let document = sample_document();
        assert!(c.start(0).unwrap());

        assert!(!c.has_autosave().unwrap());
        assert!(c.load_autosave().unwrap().is_none());

        c.save_autosave(&document, 500).unwrap();
        assert!(c.has_autosave().unwrap());
        let restored = c.load_autosave().unwrap().unwrap();
        assert_eq!(restored.elements.len(), 1);
        assert_eq!(restored.elements[0].name, "Filled Rect 1");

        // An autosave of an empty layout is not worth restoring.
        c.save_autosave(&Document::new(), 600).unwrap();
        assert!(!c.has_autosave().unwrap());

        c.clear_autosave().unwrap();
        assert!(c.load_autosave().unwrap().is_none());
    }

    #[test]
    fn test_bad_autosaves_are_discarded_on_load() {
        let (store, mut c) = coordinator();
        assert!(c.start(0).unwrap());

        store.set(AUTOSAVE_KEY, "{not json").unwrap();
        // Probing leaves the record in place; loading clears it.
        assert!(!c.has_autosave().unwrap());
        assert!(store.get(AUTOSAVE_KEY).unwrap().is_some());
        assert!(c.load_autosave().unwrap().is_none());
        assert_eq!(store.get(AUTOSAVE_KEY).unwrap(), None);

        let record = AutosaveRecord {
            version: 99,
            timestamp: 0,
            layout: sample_document(),
        };
        store
            .set(AUTOSAVE_KEY, &serde_json::to_string(&record).unwrap())
            .unwrap();
        assert!(c.load_autosave().unwrap().is_none());
        assert_eq!(store.get(AUTOSAVE_KEY).unwrap(), None);
    }

    #[test]
    fn test_heartbeat_keeps_lock_fresh() {
        let (store, mut c) = coordinator();
        let document = Document::new();
        assert!(c.start(0).unwrap());

        let other = EditLock::new(store, Uuid::new_v4());
        c.tick(&document, 10_000).unwrap();
        c.tick(&document, 20_000).unwrap();

        // 35s after start, but the last heartbeat was at 20s.
        assert!(other.is_locked_by_other(35_000).unwrap());
    }

    #[test]
    fn test_second_session_stays_read_only() {
        let (store, mut a) = coordinator();
        assert!(a.start(0).unwrap());

        let mut b = PersistenceCoordinator::new(store, Uuid::new_v4());
        assert!(!b.start(100).unwrap());
        assert!(!b.is_editing());

        // Read-only sessions never autosave.
        b.mark_dirty(200);
        assert!(!b.tick(&sample_document(), 5_000).unwrap());
    }

    #[test]
    fn test_take_control_demotes_editor() {
        let (store, mut a) = coordinator();
        let rx = store.subscribe();
        assert!(a.start(0).unwrap());
        a.save_autosave(&sample_document(), 50).unwrap();
        while rx.try_recv().is_ok() {}

        let mut b = PersistenceCoordinator::new(store.clone(), Uuid::new_v4());
        let restored = b.take_control(100).unwrap();
        assert_eq!(restored.unwrap().elements.len(), 1);
        assert!(b.is_editing());

        let mut demoted = false;
        while let Ok(change) = rx.try_recv() {
            demoted |= a.handle_change(&change, 200).unwrap();
        }
        assert!(demoted);
        assert!(!a.is_editing());
        // The new editor still holds the lock.
        assert_eq!(a.lock().holder().unwrap(), Some(b.session_id()));
    }

    #[test]
    fn test_demotion_cancels_pending_autosave() {
        let (store, mut a) = coordinator();
        let rx = store.subscribe();
        assert!(a.start(0).unwrap());
        a.mark_dirty(100);
        while rx.try_recv().is_ok() {}

        let mut b = PersistenceCoordinator::new(store.clone(), Uuid::new_v4());
        b.take_control(200).unwrap();
        while let Ok(change) = rx.try_recv() {
            a.handle_change(&change, 300).unwrap();
        }

        // The debounced save from before the demotion never fires.
        assert!(!a.tick(&sample_document(), 2_000).unwrap());
        assert_eq!(store.get(AUTOSAVE_KEY).unwrap(), None);
    }

    #[test]
    fn test_stop_releases_lock() {
        let (store, mut c) = coordinator();
        assert!(c.start(0).unwrap());
        c.stop().unwrap();
        assert!(!c.is_editing());

        let other = EditLock::new(store, Uuid::new_v4());
        assert!(other.acquire(100).unwrap());
    }
}

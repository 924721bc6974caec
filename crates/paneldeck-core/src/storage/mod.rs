//! Persistence plumbing: shared key-value stores, the cross-session edit
//! lock, and the autosave coordinator.
//!
//! Everything here works against the [`KvStore`] trait so hosts can bring
//! their own backend (browser local storage, a settings database). Two
//! implementations ship: [`MemoryKv`] for tests and ephemeral sessions,
//! and [`FileKv`] for native hosts.

mod coordinator;
mod lock;
mod memory;
mod prefs;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use coordinator::{
    AutosaveRecord, PersistenceCoordinator, AUTOSAVE_DEBOUNCE_MS, AUTOSAVE_KEY,
    HEARTBEAT_INTERVAL_MS, SCHEMA_VERSION,
};
pub use lock::{EditLock, LockRecord, EDIT_LOCK_KEY, LOCK_STALE_MS};
pub use memory::MemoryKv;
pub use prefs::{
    is_welcomed, set_welcomed, RecentEntry, RecentLayouts, MAX_RECENT, RECENT_KEY, WELCOMED_KEY,
};

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileKv;

use std::sync::mpsc::Receiver;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("io error: {0}")]
    Io(String),
    #[error("storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// A change observed on a store key. `value` is None for removals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KvChange {
    pub key: String,
    pub value: Option<String>,
}

/// String key-value storage with change notification.
///
/// Several sessions may share one store; the change channel is how one
/// session notices another's writes. Every write and removal is broadcast
/// to every subscriber, including the session that made it, so handlers
/// filter for the keys (and owners) they care about.
pub trait KvStore: Send + Sync {
    /// Read a value. Missing keys are Ok(None), not an error.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove a key. Removing a missing key is fine.
    fn remove(&self, key: &str) -> StoreResult<()>;

    /// Subscribe to changes made through this store.
    fn subscribe(&self) -> Receiver<KvChange>;
}

//! In-memory key-value store.

use super::{KvChange, KvStore, StoreError, StoreResult};
use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Mutex, RwLock};

/// In-memory store for tests and ephemeral use.
///
/// Shared behind an `Arc`, one instance plays the role browser-local
/// storage plays for a set of tabs: every subscriber observes every
/// change, its own writes included.
#[derive(Default)]
pub struct MemoryKv {
    entries: RwLock<HashMap<String, String>>,
    subscribers: Mutex<Vec<Sender<KvChange>>>,
}

impl MemoryKv {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn broadcast(&self, change: KvChange) {
        let Ok(mut subscribers) = self.subscribers.lock() else {
            return;
        };
        // Disconnected receivers drop out here.
        subscribers.retain(|tx| tx.send(change.clone()).is_ok());
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| StoreError::Other(format!("lock error: {e}")))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        {
            let mut entries = self
                .entries
                .write()
                .map_err(|e| StoreError::Other(format!("lock error: {e}")))?;
            entries.insert(key.to_string(), value.to_string());
        }
        self.broadcast(KvChange {
            key: key.to_string(),
            value: Some(value.to_string()),
        });
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let removed = {
            let mut entries = self
                .entries
                .write()
                .map_err(|e| StoreError::Other(format!("lock error: {e}")))?;
            entries.remove(key).is_some()
        };
        if removed {
            self.broadcast(KvChange {
                key: key.to_string(),
                value: None,
            });
        }
        Ok(())
    }

    fn subscribe(&self) -> Receiver<KvChange> {
        let (tx, rx) = mpsc::channel();
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.push(tx);
        }
        rx
    }
}

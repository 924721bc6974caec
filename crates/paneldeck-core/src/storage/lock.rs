//! Cross-session edit lock.
//!
//! Only one session may edit the shared layout at a time. The lock is a
//! small record in the shared store, kept fresh by heartbeats; a claim
//! whose heartbeat is older than [`LOCK_STALE_MS`] counts as abandoned and
//! can be taken over. Unreadable records count as abandoned too, so a
//! corrupt write can never brick editing.

use super::{KvStore, StoreError, StoreResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Store key the lock record lives under.
pub const EDIT_LOCK_KEY: &str = "paneldeck-editor-lock";

/// A claim older than this is considered abandoned, in milliseconds.
pub const LOCK_STALE_MS: u64 = 30_000;

/// The record stored under [`EDIT_LOCK_KEY`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockRecord {
    /// Session holding the claim.
    pub owner: Uuid,
    /// Last heartbeat, in milliseconds since the epoch.
    pub timestamp: u64,
}

/// One session's handle on the shared edit lock.
pub struct EditLock {
    store: Arc<dyn KvStore>,
    session_id: Uuid,
}

impl EditLock {
    pub fn new(store: Arc<dyn KvStore>, session_id: Uuid) -> Self {
        Self { store, session_id }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Current readable claim, if any. Corrupt records read as no claim.
    fn read(&self) -> StoreResult<Option<LockRecord>> {
        let Some(raw) = self.store.get(EDIT_LOCK_KEY)? else {
            return Ok(None);
        };
        Ok(serde_json::from_str(&raw).ok())
    }

    fn write(&self, now_ms: u64) -> StoreResult<()> {
        let record = LockRecord {
            owner: self.session_id,
            timestamp: now_ms,
        };
        let json = serde_json::to_string(&record)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.store.set(EDIT_LOCK_KEY, &json)
    }

    /// Try to claim the lock. Fails only when another session holds a
    /// fresh claim; missing, own, stale, and corrupt records are all
    /// claimable.
    pub fn acquire(&self, now_ms: u64) -> StoreResult<bool> {
        if self.is_locked_by_other(now_ms)? {
            return Ok(false);
        }
        self.write(now_ms)?;
        Ok(true)
    }

    /// Claim the lock regardless of any existing holder.
    pub fn force_acquire(&self, now_ms: u64) -> StoreResult<()> {
        self.write(now_ms)
    }

    /// Refresh the claim timestamp. Called periodically while editing so
    /// the claim never goes stale under us.
    pub fn heartbeat(&self, now_ms: u64) -> StoreResult<()> {
        self.write(now_ms)
    }

    /// Release our claim. Another session's claim is left alone; an
    /// unreadable record is cleared.
    pub fn release(&self) -> StoreResult<()> {
        let Some(raw) = self.store.get(EDIT_LOCK_KEY)? else {
            return Ok(());
        };
        match serde_json::from_str::<LockRecord>(&raw) {
            Ok(record) if record.owner != self.session_id => Ok(()),
            _ => self.store.remove(EDIT_LOCK_KEY),
        }
    }

    /// Whether another session holds a fresh claim.
    pub fn is_locked_by_other(&self, now_ms: u64) -> StoreResult<bool> {
        match self.read()? {
            Some(record) => Ok(record.owner != self.session_id
                && now_ms.saturating_sub(record.timestamp) < LOCK_STALE_MS),
            None => Ok(false),
        }
    }

    /// Owner of the current readable claim, fresh or not.
    pub fn holder(&self) -> StoreResult<Option<Uuid>> {
        Ok(self.read()?.map(|record| record.owner))
    }
}

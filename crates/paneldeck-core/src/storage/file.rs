//! File-backed key-value store for native hosts.

use super::{KvChange, KvStore, StoreError, StoreResult};
use std::fs;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Mutex;

/// File-backed store. Each key becomes one file under the base directory.
///
/// Changes are broadcast to subscribers within this process only; nothing
/// watches the filesystem for writes by other processes.
pub struct FileKv {
    base_path: PathBuf,
    subscribers: Mutex<Vec<Sender<KvChange>>>,
}

impl FileKv {
    /// Create a store rooted at the given directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StoreResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StoreError::Io(format!("failed to create storage directory: {e}"))
            })?;
        }
        Ok(Self {
            base_path,
            subscribers: Mutex::new(Vec::new()),
        })
    }

    /// Create a store in the platform's local data directory.
    ///
    /// On Unix: `~/.local/share/paneldeck/`
    /// On Windows: `%LOCALAPPDATA%\paneldeck\`
    pub fn default_location() -> StoreResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StoreError::Io("could not determine home directory".to_string()))?;
        Self::new(base.join("paneldeck"))
    }

    /// Get the base path.
    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }

    fn key_path(&self, key: &str) -> PathBuf {
        // Sanitize keys to be safe as filenames
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.base_path.join(format!("{safe}.json"))
    }

    fn broadcast(&self, change: KvChange) {
        let Ok(mut subscribers) = self.subscribers.lock() else {
            return;
        };
        subscribers.retain(|tx| tx.send(change.clone()).is_ok());
    }
}

impl KvStore for FileKv {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| StoreError::Io(format!("failed to read {}: {e}", path.display())))
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.key_path(key);
        fs::write(&path, value)
            .map_err(|e| StoreError::Io(format!("failed to write {}: {e}", path.display())))?;
        self.broadcast(KvChange {
            key: key.to_string(),
            value: Some(value.to_string()),
        });
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(());
        }
        fs::remove_file(&path)
            .map_err(|e| StoreError::Io(format!("failed to delete {}: {e}", path.display())))?;
        self.broadcast(KvChange {
            key: key.to_string(),
            value: None,
        });
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

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_round_trip() {
        let dir = tempdir().unwrap();
        let store = FileKv::new(dir.path().to_path_buf()).unwrap();

        assert_eq!(store.get("missing").unwrap(), None);
        store.set("paneldeck-autosave", "{\"version\":1}").unwrap();
        assert_eq!(
            store.get("paneldeck-autosave").unwrap().as_deref(),
            Some("{\"version\":1}")
        );

        store.remove("paneldeck-autosave").unwrap();
        assert_eq!(store.get("paneldeck-autosave").unwrap(), None);
    }

    #[test]
    fn test_sanitizes_keys() {
        let dir = tempdir().unwrap();
        let store = FileKv::new(dir.path().to_path_buf()).unwrap();

        store.set("weird/key:with*chars", "ok").unwrap();
        assert_eq!(
            store.get("weird/key:with*chars").unwrap().as_deref(),
            Some("ok")
        );

        // The file on disk carries the sanitized name.
        assert!(dir.path().join("weird_key_with_chars.json").exists());
    }

    #[test]
    fn test_notifies_subscribers() {
        let dir = tempdir().unwrap();
        let store = FileKv::new(dir.path().to_path_buf()).unwrap();
        let rx = store.subscribe();

        store.set("k", "v").unwrap();
        assert_eq!(
            rx.try_recv().unwrap(),
            KvChange {
                key: "k".to_string(),
                value: Some("v".to_string()),
            }
        );
    }
}

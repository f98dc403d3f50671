//! Durable key/value storage backing the token store
//!
//! Mirrors browser local storage: string keys, string values, one process
//! reading and writing at a time.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::AuthError;

/// String key/value storage that survives process restarts
pub trait SessionStorage: Send + Sync + std::fmt::Debug {
    /// Read a value
    fn get(&self, key: &str) -> Result<Option<String>, AuthError>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<(), AuthError>;

    /// Remove a value; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<(), AuthError>;
}

/// Storage backed by a single JSON object file.
///
/// Writes go to a sibling temp file that is then renamed over the original,
/// so a crash mid-write never leaves a truncated session file behind.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    /// Create storage at the given path. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, AuthError> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(AuthError::storage(&self.path, e)),
        };

        serde_json::from_slice(&raw).map_err(|source| AuthError::CorruptStorage {
            path: self.path.clone(),
            source,
        })
    }

    /// Entries to start a write from. A corrupt file is replaced wholesale;
    /// the flag reports that it needs rewriting even if nothing changes.
    fn load_for_write(&self) -> Result<(BTreeMap<String, String>, bool), AuthError> {
        match self.load() {
            Ok(entries) => Ok((entries, false)),
            Err(e @ AuthError::CorruptStorage { .. }) => {
                tracing::warn!(
                    error = %e,
                    code = e.error_code(),
                    "overwriting corrupt session storage"
                );
                Ok((BTreeMap::new(), true))
            }
            Err(e) => Err(e),
        }
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| AuthError::storage(parent, e))?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let body = serde_json::to_vec_pretty(entries).map_err(|source| {
            AuthError::CorruptStorage {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&tmp, body).map_err(|e| AuthError::storage(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| AuthError::storage(&self.path, e))?;

        tracing::trace!(path = %self.path.display(), "persisted session storage");
        Ok(())
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, AuthError> {
        let _guard = self.lock.lock();
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AuthError> {
        let _guard = self.lock.lock();
        let (mut entries, _) = self.load_for_write()?;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), AuthError> {
        let _guard = self.lock.lock();
        let (mut entries, reset) = self.load_for_write()?;
        if entries.remove(key).is_none() && !reset {
            return Ok(());
        }
        self.persist(&entries)
    }
}

/// In-process storage for tests and throwaway sessions
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, AuthError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AuthError> {
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AuthError> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

//! Session token store
//!
//! Holds at most one session token. The token is loaded from durable storage
//! once at startup, and every mutation updates memory before persisting, so
//! [`TokenStore::read`] always reflects the latest `save`/`clear` even if the
//! storage write failed.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::storage::{MemoryStorage, SessionStorage};
use crate::{AuthError, TOKEN_KEY};

/// Process-wide holder of the current session token.
///
/// Share it through an `Arc`; each read or write is a single step under the
/// lock, so no consumer can observe a half-applied change.
pub struct TokenStore {
    storage: Arc<dyn SessionStorage>,
    current: RwLock<Option<String>>,
}

impl TokenStore {
    /// Load the persisted token (if any) from storage.
    ///
    /// Corrupt storage counts as signed out; the next `save` or `clear`
    /// overwrites it.
    pub fn init(storage: Arc<dyn SessionStorage>) -> Result<Self, AuthError> {
        let current = match storage.get(TOKEN_KEY) {
            Ok(current) => current,
            Err(e @ AuthError::CorruptStorage { .. }) => {
                tracing::warn!(
                    error = %e,
                    code = e.error_code(),
                    "ignoring corrupt session storage"
                );
                None
            }
            Err(e) => return Err(e),
        };
        tracing::debug!(has_token = current.is_some(), "token store initialized");
        Ok(Self {
            storage,
            current: RwLock::new(current),
        })
    }

    /// Create an empty store that persists nowhere
    pub fn in_memory() -> Self {
        Self {
            storage: Arc::new(MemoryStorage::new()),
            current: RwLock::new(None),
        }
    }

    /// Store a token, replacing any existing one
    pub fn save(&self, token: impl Into<String>) -> Result<(), AuthError> {
        let token = token.into();
        let mut current = self.current.write();
        let result = self.storage.set(TOKEN_KEY, &token);
        *current = Some(token);
        result
    }

    /// Current token, if any. No side effects.
    pub fn read(&self) -> Option<String> {
        self.current.read().clone()
    }

    /// Remove the token
    pub fn clear(&self) -> Result<(), AuthError> {
        let mut current = self.current.write();
        let result = self.storage.remove(TOKEN_KEY);
        *current = None;
        result
    }

    /// Whether a token is present
    pub fn is_logged_in(&self) -> bool {
        self.current.read().is_some()
    }
}

impl std::fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStore")
            .field("storage", &self.storage)
            .field("has_token", &self.is_logged_in())
            .finish()
    }
}

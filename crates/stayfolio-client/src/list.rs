//! In-memory apartment list
//!
//! The list mirrors the order of the last full load. It only ever changes by
//! a full replace after a successful reload, or by removing one entry after
//! the server confirmed the delete.

use parking_lot::RwLock;
use stayfolio_types::{Apartment, ApartmentId};
use tracing::instrument;

use crate::{ApartmentsClient, ClientError};

/// Ordered apartments, as last loaded
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApartmentList {
    items: Vec<Apartment>,
}

impl ApartmentList {
    /// Replace the whole list, keeping the given order
    pub fn replace_all(&mut self, items: Vec<Apartment>) {
        self.items = items;
    }

    /// Remove the entry with this identifier, keeping the order of the rest
    pub fn remove_by_id(&mut self, id: &ApartmentId) -> Option<Apartment> {
        let index = self.items.iter().position(|a| &a.id == id)?;
        Some(self.items.remove(index))
    }

    /// Look up an entry
    pub fn get(&self, id: &ApartmentId) -> Option<&Apartment> {
        self.items.iter().find(|a| &a.id == id)
    }

    pub fn as_slice(&self) -> &[Apartment] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Result of [`ListMutationCache::remove`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// Confirmation declined; nothing was sent
    Declined,
    /// Server deleted it and the local entry is gone
    Deleted,
}

/// Apartment list kept in sync with the remote API
#[derive(Debug)]
pub struct ListMutationCache {
    api: ApartmentsClient,
    list: RwLock<ApartmentList>,
}

impl ListMutationCache {
    /// Create an empty cache; call [`reload`](Self::reload) to populate it
    pub fn new(api: ApartmentsClient) -> Self {
        Self {
            api,
            list: RwLock::new(ApartmentList::default()),
        }
    }

    /// Fetch the full list and replace the cache with it.
    ///
    /// On failure the cache is left as it was.
    #[instrument(skip(self), level = "debug")]
    pub async fn reload(&self) -> Result<usize, ClientError> {
        let items = self.api.list().await?;
        let count = items.len();
        self.list.write().replace_all(items);
        tracing::debug!(count, "apartment list reloaded");
        Ok(count)
    }

    /// Delete an apartment after confirmation.
    ///
    /// `confirm` runs first; declining sends nothing. The local entry is
    /// removed only after the server accepted the delete, without a refetch.
    #[instrument(skip(self, confirm), fields(id = %id), level = "debug")]
    pub async fn remove(
        &self,
        id: &ApartmentId,
        confirm: impl FnOnce(&ApartmentId) -> bool,
    ) -> Result<Removal, ClientError> {
        if !confirm(id) {
            tracing::debug!("delete declined");
            return Ok(Removal::Declined);
        }

        self.api.delete(id).await?;

        if self.list.write().remove_by_id(id).is_none() {
            tracing::debug!("deleted apartment was not in the cached list");
        }
        Ok(Removal::Deleted)
    }

    /// Copy of the current list
    pub fn snapshot(&self) -> Vec<Apartment> {
        self.list.read().as_slice().to_vec()
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.list.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.read().is_empty()
    }
}

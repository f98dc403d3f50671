//! Unified client
//!
//! [`StayfolioClient`] wires the configuration, the session token store, the
//! request client and the route guard together so every consumer shares one
//! session.
//!
//! # Example
//!
//! ```ignore
//! use stayfolio_client::{ClientConfig, StayfolioClient};
//!
//! let client = StayfolioClient::open(ClientConfig::from_env()?)?;
//! client.apartments().login("admin@example.com", "secret").await?;
//!
//! let list = client.list_cache();
//! list.reload().await?;
//! ```

use std::sync::Arc;

use stayfolio_auth::{
    default_session_file, AdminAffordance, FileStorage, MemoryStorage, RouteGuard,
    SessionStorage, TokenStore,
};
use stayfolio_types::ApartmentId;

use crate::{share, ApartmentsClient, ApiClient, ClientConfig, ClientError, ListMutationCache};

/// Entry point sharing one session across all operations
#[derive(Debug, Clone)]
pub struct StayfolioClient {
    config: Arc<ClientConfig>,
    apartments: ApartmentsClient,
    guard: RouteGuard,
}

impl StayfolioClient {
    /// Open a client, loading the persisted session.
    ///
    /// The session lives in the configured session file, else in the
    /// platform's local data directory. Without either it is kept in memory.
    pub fn open(config: ClientConfig) -> Result<Self, ClientError> {
        let path = config
            .session_file()
            .map(|p| p.to_path_buf())
            .or_else(default_session_file);

        let storage: Arc<dyn SessionStorage> = match path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "using session file");
                Arc::new(FileStorage::new(path))
            }
            None => {
                tracing::warn!("no session file location available, session will not persist");
                Arc::new(MemoryStorage::new())
            }
        };

        Self::with_storage(config, storage)
    }

    /// Open a client on explicit session storage
    pub fn with_storage(
        config: ClientConfig,
        storage: Arc<dyn SessionStorage>,
    ) -> Result<Self, ClientError> {
        let store = Arc::new(TokenStore::init(storage)?);
        Self::with_store(config, store)
    }

    /// Open a client on an existing token store
    pub fn with_store(config: ClientConfig, store: Arc<TokenStore>) -> Result<Self, ClientError> {
        let api = ApiClient::new(&config, store.clone())?;
        Ok(Self {
            config: Arc::new(config),
            apartments: ApartmentsClient::new(api),
            guard: RouteGuard::new(store),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Session token store
    pub fn store(&self) -> &Arc<TokenStore> {
        self.apartments.store()
    }

    /// Apartment and login operations
    pub fn apartments(&self) -> &ApartmentsClient {
        &self.apartments
    }

    /// Guard for protected views
    pub fn guard(&self) -> &RouteGuard {
        &self.guard
    }

    /// New, empty list cache backed by this client
    pub fn list_cache(&self) -> ListMutationCache {
        ListMutationCache::new(self.apartments.clone())
    }

    /// Which admin controls to offer right now
    pub fn affordance(&self) -> AdminAffordance {
        AdminAffordance::evaluate(self.store())
    }

    /// Public share link for an apartment
    pub fn share_url(&self, id: &ApartmentId) -> String {
        share::share_url(&self.config, id)
    }
}

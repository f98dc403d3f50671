//! Stayfolio Client - SDK for the apartment catalog API
//!
//! Authenticated requests with session invalidation on rejection, typed
//! apartment operations, a race-safe per-resource fetch controller and an
//! in-memory list cache that only changes after the server confirmed a write.

pub mod apartments;
pub mod client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod http;
pub mod list;
pub mod metrics;
pub mod share;

pub use apartments::{apartment_path, ApartmentsClient, APARTMENTS_PATH, LOGIN_API_PATH};
pub use client::StayfolioClient;
pub use config::{ClientConfig, ClientConfigBuilder, ConfigError, DEFAULT_FRONTEND_BASE_URL};
pub use error::ClientError;
pub use fetch::{FetchController, FetchSlot, FetchSnapshot, FetchState};
pub use http::{bearer_header, ApiClient, RequestOptions, REQUEST_ID_HEADER};
pub use list::{ApartmentList, ListMutationCache, Removal};
pub use share::share_url;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

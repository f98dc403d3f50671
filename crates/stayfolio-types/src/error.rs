//! Common error types

use thiserror::Error;

/// Errors raised while building domain values from untrusted input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypesError {
    /// Apartment title is empty after trimming
    #[error("title is required")]
    TitleRequired,

    /// Apartment identifier is empty or not usable in a URL path segment
    #[error("invalid apartment id: {0:?}")]
    InvalidApartmentId(String),
}

//! Client errors
//!
//! Error types for Stayfolio API operations, with mapping from HTTP status
//! codes.

use stayfolio_auth::AuthError;
use stayfolio_types::TypesError;
use thiserror::Error;

/// Client errors for Stayfolio operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport failure - no response was received.
    #[error("network error: {0}")]
    Transport(String),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// The remote API rejected the session. The stored token has already been
    /// cleared by the time this is returned.
    #[error("session rejected by the server, please log in again")]
    Unauthorized,

    /// Any other non-2xx response.
    #[error("request failed (HTTP {status})")]
    Http {
        /// Response status code
        status: u16,
    },

    /// Local validation rejected the input before any request was sent.
    #[error("invalid input: {0}")]
    Validation(#[from] TypesError),

    /// Login was refused.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Login succeeded but the response carried no token.
    #[error("login response did not contain a token")]
    MissingToken,

    /// The stored token cannot be sent as a header value.
    #[error("stored session token is not a valid header value")]
    InvalidToken,

    /// Request or response body could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Session storage error.
    #[error("session storage error: {0}")]
    Auth(#[from] AuthError),
}

impl ClientError {
    /// Returns true if a manual retry may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Http { status } => *status >= 500 || *status == 429,
            Self::NotFound(_) => false,
            Self::Unauthorized => false, // Need a new session
            Self::Validation(_) => false,
            Self::InvalidCredentials => false,
            Self::MissingToken => false,
            Self::InvalidToken => false,
            Self::Serialization(_) => false,
            Self::Config(_) => false,
            Self::Auth(_) => false,
        }
    }

    /// Returns the HTTP status code if this error came from a response.
    #[must_use]
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::NotFound(_) => Some(404),
            Self::Unauthorized => Some(401),
            Self::Http { status } => Some(*status),
            _ => None,
        }
    }

    /// Map a non-2xx status to an error.
    pub fn from_status(status: u16, resource: impl Into<String>) -> Self {
        match status {
            401 => Self::Unauthorized,
            404 => Self::NotFound(resource.into()),
            _ => Self::Http { status },
        }
    }

    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::Serialization(err.to_string());
        }
        match err.status() {
            Some(status) => Self::from_status(status.as_u16(), err.to_string()),
            None => Self::Transport(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

//! Auth errors

use std::path::PathBuf;

use thiserror::Error;

/// Session storage errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Reading or writing the session file failed
    #[error("session storage I/O error at {path}: {source}")]
    Storage {
        /// File being accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The session file exists but is not a JSON object of strings
    #[error("session storage at {path} is corrupt: {source}")]
    CorruptStorage {
        /// File being read
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },
}

impl AuthError {
    pub(crate) fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Get error code for CLI and log output
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Storage { .. } => "SESSION_STORAGE_ERROR",
            Self::CorruptStorage { .. } => "SESSION_STORAGE_CORRUPT",
        }
    }
}

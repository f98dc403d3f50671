//! Authentication wire types

use serde::{Deserialize, Serialize};

/// Login request body for `POST /api/login`
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account email, trimmed
    pub email: String,
    /// Password, sent as typed
    pub password: String,
}

impl LoginRequest {
    /// Create a login request, trimming the email
    pub fn new(email: &str, password: impl Into<String>) -> Self {
        Self {
            email: email.trim().to_string(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Login response body.
///
/// The token is optional on the wire: a successful status without a token is
/// reported as a distinct failure by the client.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Session token
    #[serde(default)]
    pub token: Option<String>,
}

impl std::fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginResponse")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

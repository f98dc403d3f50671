//! Test session tokens
//!
//! Mints real HS256 JWTs so the decoder is exercised against the same shape
//! the remote API issues. The signature is never checked client-side, so the
//! secret is arbitrary.

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

const TEST_SECRET: &[u8] = b"stayfolio-test-secret-not-for-production";

/// Claims as issued by the login endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestClaims {
    pub sub: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
    pub iat: i64,
    pub exp: i64,
}

impl TestClaims {
    /// Claims for a plain user (no roles field at all)
    pub fn user(email: &str) -> Self {
        Self {
            sub: email.to_string(),
            roles: None,
            iat: 1_700_000_000,
            exp: 1_700_003_600,
        }
    }

    /// Claims for an admin
    pub fn admin(email: &str) -> Self {
        Self::user(email).with_roles(&["ROLE_USER", "ROLE_ADMIN"])
    }

    pub fn with_roles(mut self, roles: &[&str]) -> Self {
        self.roles = Some(roles.iter().map(|r| (*r).to_string()).collect());
        self
    }

    /// Already expired; the client must not care
    #[allow(dead_code)]
    pub fn expired(mut self) -> Self {
        self.iat = 1;
        self.exp = 2;
        self
    }
}

/// Sign claims into a compact JWT
pub fn sign(claims: &TestClaims) -> String {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(TEST_SECRET),
    )
    .expect("Failed to sign JWT")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_jwt() {
        let token = sign(&TestClaims::admin("admin@example.com"));
        assert_eq!(token.split('.').count(), 3);
    }
}

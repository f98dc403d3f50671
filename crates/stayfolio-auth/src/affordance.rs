//! Admin affordance gating

use stayfolio_types::ROLE_ADMIN;

use crate::{token, TokenStore};

/// Which administration controls a view should offer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAffordance {
    /// Token claims the admin role: offer edit and delete
    Admin,
    /// Token present but without the admin role (or undecodable)
    SignedInWithoutPermission,
    /// No token: offer a login link
    Anonymous,
}

impl AdminAffordance {
    /// Evaluate against the current store contents. Not cached.
    pub fn evaluate(store: &TokenStore) -> Self {
        match store.read() {
            None => Self::Anonymous,
            Some(token) if token::has_role(&token, ROLE_ADMIN) => Self::Admin,
            Some(_) => Self::SignedInWithoutPermission,
        }
    }

    /// Whether create/edit/delete controls are unlocked
    pub fn can_manage(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Whether a login prompt should be offered
    pub fn offers_login(&self) -> bool {
        matches!(self, Self::Anonymous)
    }
}

/// Whether the stored token claims the admin role
pub fn is_admin(store: &TokenStore) -> bool {
    AdminAffordance::evaluate(store).can_manage()
}

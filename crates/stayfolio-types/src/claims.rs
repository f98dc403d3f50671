//! Session claim types

use std::collections::BTreeSet;

use serde_json::{Map, Value};

/// Role granting the privileged create/edit/delete affordances
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

/// Unverified claims carried inside a session token.
///
/// Only ever used for UI affordance gating. The remote service re-authorizes
/// every mutating call on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimSet {
    roles: BTreeSet<String>,
    extra: Map<String, Value>,
}

impl ClaimSet {
    /// Build a claim set from a decoded JSON payload.
    ///
    /// Returns `None` unless the payload is a JSON object. A `roles` field
    /// that is missing or not an array yields no roles; non-string entries
    /// are skipped.
    pub fn from_json(payload: Value) -> Option<Self> {
        let Value::Object(mut extra) = payload else {
            return None;
        };

        let roles = match extra.remove("roles") {
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(role) => Some(role),
                    _ => None,
                })
                .collect(),
            _ => BTreeSet::new(),
        };

        Some(Self { roles, extra })
    }

    /// Roles present in the claim set
    pub fn roles(&self) -> &BTreeSet<String> {
        &self.roles
    }

    /// Check whether a role is present
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    /// Check for the admin role
    pub fn is_admin(&self) -> bool {
        self.has_role(ROLE_ADMIN)
    }

    /// Look up any other claim by name (e.g. `sub`, `email`)
    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }

    /// Subject claim, when it is a string
    pub fn subject(&self) -> Option<&str> {
        self.claim("sub").and_then(Value::as_str)
    }
}

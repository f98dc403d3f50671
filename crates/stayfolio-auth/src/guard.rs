//! Route guard for protected views
//!
//! The guard is evaluated every time a protected view is entered. It holds no
//! decision of its own: the token store may have been cleared in between (for
//! example by a rejected request), and the next evaluation must see that.
//!
//! # Example
//!
//! ```ignore
//! use stayfolio_auth::{Guarded, RouteGuard};
//!
//! let guard = RouteGuard::new(store.clone());
//! match guard.guard("/apartments/new", || render_create_form()) {
//!     Guarded::Render(view) => show(view),
//!     Guarded::Redirect(redirect) => navigate(redirect.to(), redirect.from()),
//! }
//! ```

use std::sync::Arc;

use crate::{Route, TokenStore, HOME_PATH, LOGIN_PATH};

/// Redirect to the login view, remembering where the user was headed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginRedirect {
    from: String,
}

impl LoginRedirect {
    /// Target of the redirect
    pub fn to(&self) -> &'static str {
        LOGIN_PATH
    }

    /// Originally requested path, to return to after login
    pub fn from(&self) -> &str {
        &self.from
    }
}

impl std::fmt::Display for LoginRedirect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (from {})", LOGIN_PATH, self.from)
    }
}

/// Outcome of guarding a view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Guarded<V> {
    /// Session present: the wrapped view, unchanged
    Render(V),
    /// No session: go to login instead
    Redirect(LoginRedirect),
}

/// Gate in front of protected views
#[derive(Debug, Clone)]
pub struct RouteGuard {
    store: Arc<TokenStore>,
}

impl RouteGuard {
    /// Create a guard reading from the given store
    pub fn new(store: Arc<TokenStore>) -> Self {
        Self { store }
    }

    /// Check entry into a protected view at `requested_path`
    pub fn check(&self, requested_path: &str) -> Result<(), LoginRedirect> {
        if self.store.is_logged_in() {
            return Ok(());
        }

        tracing::debug!(from = requested_path, "no session, redirecting to login");
        Err(LoginRedirect {
            from: requested_path.to_string(),
        })
    }

    /// Check entry into a route; unprotected routes always pass
    pub fn enter(&self, route: &Route) -> Result<(), LoginRedirect> {
        if route.is_protected() {
            self.check(&route.path())
        } else {
            Ok(())
        }
    }

    /// Build the view only if entry into `requested_path` is allowed
    pub fn guard<V>(&self, requested_path: &str, view: impl FnOnce() -> V) -> Guarded<V> {
        match self.check(requested_path) {
            Ok(()) => Guarded::Render(view()),
            Err(redirect) => Guarded::Redirect(redirect),
        }
    }
}

/// Where to send the user after a successful login
pub fn login_return_path(from: Option<&str>) -> &str {
    from.filter(|p| !p.is_empty()).unwrap_or(HOME_PATH)
}

//! Stayfolio Auth - Client-side session handling
//!
//! Durable session token storage, untrusted claim decoding for UI affordance
//! gating, and the route guard that keeps anonymous users out of protected
//! views.
//!
//! Nothing in this crate verifies a token. The remote API re-authorizes every
//! mutating call; the decoded claims only decide which controls to offer.

pub mod affordance;
pub mod config;
pub mod error;
pub mod guard;
pub mod routes;
pub mod storage;
pub mod store;
pub mod token;

pub use affordance::{is_admin, AdminAffordance};
pub use config::{default_session_file, HOME_PATH, LOGIN_PATH, TOKEN_KEY};
pub use error::AuthError;
pub use guard::{login_return_path, Guarded, LoginRedirect, RouteGuard};
pub use routes::Route;
pub use storage::{FileStorage, MemoryStorage, SessionStorage};
pub use store::TokenStore;
pub use token::{decode, has_role};

//! Stayfolio Types - Shared domain types
//!
//! This crate contains domain types used across the Stayfolio crates:
//! - Apartment listings and their create/update drafts
//! - Session claim sets decoded from bearer tokens
//! - Login request/response wire types

pub mod apartment;
pub mod auth;
pub mod claims;
pub mod error;

pub use apartment::*;
pub use auth::*;
pub use claims::*;
pub use error::*;

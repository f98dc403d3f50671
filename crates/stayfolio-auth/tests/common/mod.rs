//! Common test utilities for stayfolio-auth integration tests

pub mod tokens;

#[allow(unused_imports)]
pub use tokens::{sign, TestClaims};

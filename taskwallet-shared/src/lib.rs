//! # TaskWallet Shared Library
//!
//! Domain types, the in-memory store and authentication helpers used by the
//! TaskWallet API server.
//!
//! ## Module Organization
//!
//! - `models`: entities and their local invariants
//! - `store`: state transitions, seed data and snapshot persistence
//! - `auth`: password hashing, JWTs and bearer-token parsing
//! - `error`: the store error type

pub mod auth;
pub mod error;
pub mod models;
pub mod store;

/// Current version of the TaskWallet shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}

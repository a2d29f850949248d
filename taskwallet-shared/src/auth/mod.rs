//! Authentication primitives
//!
//! - [`password`]: Argon2id password hashing and validation
//! - [`jwt`]: JWT token generation and validation
//! - [`admin`]: the configured administrator credential pair
//! - [`middleware`]: bearer-token extraction into an [`middleware::AuthContext`]

pub mod admin;
pub mod jwt;
pub mod middleware;
pub mod password;
